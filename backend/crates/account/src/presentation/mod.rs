//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::CurrentUser;
pub use handlers::AccountState;
pub use middleware::{authenticate, authorize, failure_boundary, language};
pub use router::{account_router, account_router_generic};

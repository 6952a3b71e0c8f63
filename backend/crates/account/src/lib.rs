//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, session credential codec, configuration
//! - `infra/` - PostgreSQL and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, gates, router
//!
//! ## Features
//! - Sign-up/sign-in with e-mail + password, profile and credential changes
//! - Social links and the technology stack catalog
//! - Administrative account locking
//! - Startup seeding of the root user and stacks
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Stateless HS256 session tokens (2 days), checked by the authentication gate
//! - Authentication failure is `403`, authorization failure is `401`
//! - Capability tiers are explicit role sets; there is no implied hierarchy

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AccountConfig, TokenConfig};
pub use application::credential::{IdentityClaims, SessionCodec, TokenError};
pub use error::{AccountError, AccountResult};
pub use infra::{memory::MemoryStore, postgres::PgAccountStore};
pub use presentation::router::{account_router, account_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{exception::Exception, kind::ErrorKind};

#[cfg(test)]
mod tests;

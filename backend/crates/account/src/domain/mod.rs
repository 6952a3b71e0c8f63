//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{social::Social, stack::Stack, user::User};
pub use repository::{
    AccountStore, SocialRepository, StackRepository, StoreError, StoreResult, UserRepository,
};
pub use value_object::{
    public_id::PublicId,
    role::{Authority, CapabilityTier, Role},
};

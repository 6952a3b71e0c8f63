//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure
//! layer. A mutation that matches no record fails with
//! [`StoreError::RecordNotFound`].

use kernel::id::UserId;
use thiserror::Error;

use crate::domain::entity::{social::Social, stack::Stack, user::User};
use crate::domain::value_object::public_id::PublicId;

/// Persistence result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failures
///
/// Callers only see these as a numeric status (see [`StoreError::status_code`]).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Update/delete matched no record
    #[error("Record to mutate not found")]
    RecordNotFound,

    /// Unique constraint violated
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Stored row could not be mapped to an entity
    #[error("Invalid stored row: {0}")]
    InvalidRow(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// 分類用のステータスコード
    ///
    /// 分類できない失敗は `None` を返します。
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StoreError::RecordNotFound => Some(404),
            StoreError::UniqueViolation(_) => Some(409),
            StoreError::InvalidRow(_) => None,
            StoreError::Database(sqlx::Error::RowNotFound) => Some(404),
            StoreError::Database(sqlx::Error::PoolTimedOut) => Some(503),
            StoreError::Database(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some("23505") =>
            {
                Some(409)
            }
            StoreError::Database(_) => None,
        }
    }
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user together with its authorities
    async fn create_user(&self, user: &User) -> StoreResult<()>;

    /// Find user by public ID
    async fn find_by_uid(&self, uid: &PublicId) -> StoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn count_by_username(&self, username: &str) -> StoreResult<u64>;

    async fn count_by_email(&self, email: &str) -> StoreResult<u64>;

    /// Update user (authorities included)
    async fn update_user(&self, user: &User) -> StoreResult<()>;
}

/// Social link repository trait
#[trait_variant::make(SocialRepository: Send)]
pub trait LocalSocialRepository {
    async fn list_socials(&self, user_id: &UserId) -> StoreResult<Vec<Social>>;

    async fn find_social(&self, user_id: &UserId, identifier: &str)
    -> StoreResult<Option<Social>>;

    async fn create_social(&self, social: &Social) -> StoreResult<()>;

    async fn update_social(&self, social: &Social) -> StoreResult<()>;

    /// Delete by owner and identifier
    async fn delete_social(&self, user_id: &UserId, identifier: &str) -> StoreResult<()>;
}

/// Stack repository trait
#[trait_variant::make(StackRepository: Send)]
pub trait LocalStackRepository {
    /// Enabled stacks, ordered by name
    async fn list_enabled(&self, take: i64, skip: i64) -> StoreResult<Vec<Stack>>;

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Stack>>;

    /// Find the first stack whose slug or name equals `key`
    async fn find_by_slug_or_name(&self, key: &str) -> StoreResult<Option<Stack>>;

    /// Find a stack with the given name or the given slug
    async fn find_conflicting(&self, name: &str, slug: &str) -> StoreResult<Option<Stack>>;

    async fn create_stack(&self, stack: &Stack) -> StoreResult<()>;

    async fn update_stack(&self, stack: &Stack) -> StoreResult<()>;

    /// Flip `enabled` only when it currently differs from `enabled`
    async fn set_stack_enabled(&self, slug: &str, enabled: bool) -> StoreResult<()>;
}

/// Everything the account service persists
pub trait AccountStore:
    UserRepository + SocialRepository + StackRepository + Clone + Send + Sync + 'static
{
}

impl<T> AccountStore for T where
    T: UserRepository + SocialRepository + StackRepository + Clone + Send + Sync + 'static
{
}

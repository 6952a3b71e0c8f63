//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod credential;
pub mod credential_change;
pub mod moderation;
pub mod profile;
pub mod seed;
pub mod sign_in;
pub mod sign_up;
pub mod social;
pub mod stack;

// Re-exports
pub use config::{AccountConfig, TokenConfig};
pub use credential::{IdentityClaims, SessionCodec, TokenError};
pub use credential_change::{CredentialChangeUseCase, EmailChangeInput, PasswordChangeInput};
pub use moderation::ModerationUseCase;
pub use profile::{ProfileUpdateInput, ProfileUseCase};
pub use seed::{RootUserSeed, SeedUseCase, StackSeed};
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use social::{SocialInput, SocialPatchInput, SocialUseCase, Upserted};
pub use stack::{StackInput, StackUpdateInput, StackUseCase};

use crate::domain::entity::{social::Social, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::public_id::PublicId;
use crate::error::{AccountError, AccountResult};

/// 利用者と、その利用者のソーシャルリンク
#[derive(Debug, Clone)]
pub struct AccountView {
    pub user: User,
    pub socials: Vec<Social>,
}

/// Account plus a freshly issued session token
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub account: AccountView,
    pub token: String,
}

/// 更新系ユースケースの結果
///
/// 変更が無かった場合は `Unchanged`（204 で応答）になります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Changed(T),
    Unchanged,
}

/// Load the user behind `uid`, refusing disabled or locked accounts.
pub(crate) async fn load_active_user<R>(repo: &R, uid: &PublicId) -> AccountResult<User>
where
    R: UserRepository,
{
    let user = repo
        .find_by_uid(uid)
        .await?
        .ok_or(AccountError::UserNotFound)?;

    if !user.is_active() {
        return Err(AccountError::AccountInactive);
    }

    Ok(user)
}

//! Moderation Use Case
//!
//! Administrative lock and unlock of accounts.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

/// Moderation use case
pub struct ModerationUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ModerationUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// ロック状態を設定
    ///
    /// ロックされた利用者は次の認証済みリクエストから拒否されます。
    /// 発行済みトークンは失効しません。
    pub async fn set_locked(&self, username: &str, locked: bool) -> AccountResult<()> {
        let mut user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if user.locked == locked {
            return Ok(());
        }

        user.set_locked(locked);
        self.user_repo.update_user(&user).await?;

        tracing::info!(uid = %user.uid, locked, "Account lock changed");
        Ok(())
    }
}

//! Profile Use Case
//!
//! Reads and edits the signed-in user's own profile.

use std::sync::Arc;

use kernel::validation::{is_name_valid, normalize_text};

use crate::application::credential::{IdentityClaims, SessionCodec};
use crate::application::{AccountView, Outcome, SessionOutput, load_active_user};
use crate::domain::repository::{SocialRepository, UserRepository};
use crate::error::{AccountError, AccountResult};

/// Profile update input (absent fields are left untouched)
#[derive(Default)]
pub struct ProfileUpdateInput {
    pub name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
}

/// Profile use case
pub struct ProfileUseCase<U, S>
where
    U: UserRepository,
    S: SocialRepository,
{
    user_repo: Arc<U>,
    social_repo: Arc<S>,
    codec: Arc<SessionCodec>,
}

impl<U, S> ProfileUseCase<U, S>
where
    U: UserRepository,
    S: SocialRepository,
{
    pub fn new(user_repo: Arc<U>, social_repo: Arc<S>, codec: Arc<SessionCodec>) -> Self {
        Self {
            user_repo,
            social_repo,
            codec,
        }
    }

    /// 現在の利用者とソーシャルリンクを取得
    pub async fn who_am_i(&self, claims: &IdentityClaims) -> AccountResult<AccountView> {
        let user = load_active_user(self.user_repo.as_ref(), &claims.uid).await?;
        let socials = self.social_repo.list_socials(&user.id).await?;

        Ok(AccountView { user, socials })
    }

    /// Update name, username and bio.
    ///
    /// Values equal to the current ones are ignored; when nothing remains the
    /// result is [`Outcome::Unchanged`].
    pub async fn update(
        &self,
        claims: &IdentityClaims,
        input: ProfileUpdateInput,
    ) -> AccountResult<Outcome<SessionOutput>> {
        let username = match input.username {
            Some(username) if username != claims.username => {
                if !is_name_valid(&username) {
                    return Err(AccountError::InvalidUsername);
                }
                Some(normalize_text(&username))
            }
            _ => None,
        };

        let name = match input.name {
            Some(name) if name != claims.name => {
                if !is_name_valid(&name) {
                    return Err(AccountError::InvalidName);
                }
                Some(normalize_text(&name))
            }
            _ => None,
        };

        let mut user = load_active_user(self.user_repo.as_ref(), &claims.uid).await?;
        let mut changed = false;

        if let Some(username) = username.filter(|u| *u != user.username) {
            if self.user_repo.count_by_username(&username).await? > 0 {
                return Err(AccountError::UsernameTaken);
            }
            user.set_username(username);
            changed = true;
        }

        if let Some(name) = name.filter(|n| *n != user.name) {
            user.set_name(name);
            changed = true;
        }

        if let Some(bio) = input.bio.filter(|b| Some(b) != user.bio.as_ref()) {
            user.set_bio(bio);
            changed = true;
        }

        if !changed {
            return Ok(Outcome::Unchanged);
        }

        self.user_repo.update_user(&user).await?;
        let token = self.codec.issue(&user)?;
        let socials = self.social_repo.list_socials(&user.id).await?;

        tracing::info!(uid = %user.uid, "Profile updated");

        Ok(Outcome::Changed(SessionOutput {
            account: AccountView { user, socials },
            token,
        }))
    }
}

//! Sign In Use Case
//!
//! Authenticates a user by e-mail and password and issues a session token.

use std::sync::Arc;

use kernel::validation::{is_email_valid, normalize_text};
use platform::password::ClearTextPassword;

use crate::application::config::AccountConfig;
use crate::application::credential::SessionCodec;
use crate::application::{AccountView, SessionOutput};
use crate::domain::repository::{SocialRepository, UserRepository};
use crate::error::{AccountError, AccountResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SocialRepository,
{
    user_repo: Arc<U>,
    social_repo: Arc<S>,
    codec: Arc<SessionCodec>,
    config: Arc<AccountConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SocialRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        social_repo: Arc<S>,
        codec: Arc<SessionCodec>,
        config: Arc<AccountConfig>,
    ) -> Self {
        Self {
            user_repo,
            social_repo,
            codec,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AccountResult<SessionOutput> {
        if !is_email_valid(&input.email) {
            return Err(AccountError::InvalidEmail);
        }
        let password = ClearTextPassword::new(input.password)?;

        let email = normalize_text(&input.email);
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if !user.is_active() {
            return Err(AccountError::AccountInactive);
        }

        if !user.password.verify(&password, self.config.pepper())? {
            return Err(AccountError::BadCredentials);
        }

        let token = self.codec.issue(&user)?;
        let socials = self.social_repo.list_socials(&user.id).await?;

        tracing::info!(uid = %user.uid, "User signed in");

        Ok(SessionOutput {
            account: AccountView { user, socials },
            token,
        })
    }
}

//! Credential Change Use Case
//!
//! E-mail and password changes. Both require the caller to prove the current
//! credentials again, and both re-issue the session token.

use std::sync::Arc;

use kernel::validation::{is_email_valid, normalize_text};
use platform::password::ClearTextPassword;

use crate::application::config::AccountConfig;
use crate::application::credential::{IdentityClaims, SessionCodec};
use crate::application::{AccountView, Outcome, SessionOutput, load_active_user};
use crate::domain::repository::{SocialRepository, UserRepository};
use crate::error::{AccountError, AccountResult};

/// E-mail change input
pub struct EmailChangeInput {
    /// Current e-mail
    pub email: String,
    pub new_email: String,
    /// Current password
    pub password: String,
}

/// Password change input
pub struct PasswordChangeInput {
    /// Current e-mail
    pub email: String,
    /// Current password
    pub password: String,
    pub new_password: String,
}

/// Credential change use case
pub struct CredentialChangeUseCase<U, S>
where
    U: UserRepository,
    S: SocialRepository,
{
    user_repo: Arc<U>,
    social_repo: Arc<S>,
    codec: Arc<SessionCodec>,
    config: Arc<AccountConfig>,
}

impl<U, S> CredentialChangeUseCase<U, S>
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

    /// Change the login e-mail.
    ///
    /// The new address starts unverified. Returns the new token only.
    pub async fn change_email(
        &self,
        claims: &IdentityClaims,
        input: EmailChangeInput,
    ) -> AccountResult<Outcome<String>> {
        if !is_email_valid(&input.email) || !is_email_valid(&input.new_email) {
            return Err(AccountError::InvalidEmail);
        }
        let password = ClearTextPassword::new(input.password)?;

        let email = normalize_text(&input.email);
        let new_email = normalize_text(&input.new_email);

        if email == new_email {
            return Err(AccountError::NewEmailMustDiffer);
        }
        if email != claims.sub {
            return Err(AccountError::BadCredentials);
        }
        if new_email == claims.sub {
            return Ok(Outcome::Unchanged);
        }

        let mut user = load_active_user(self.user_repo.as_ref(), &claims.uid).await?;

        if !user.password.verify(&password, self.config.pepper())? {
            return Err(AccountError::BadCredentials);
        }
        if self.user_repo.count_by_email(&new_email).await? > 0 {
            return Err(AccountError::EmailTaken);
        }

        user.set_email(new_email);
        self.user_repo.update_user(&user).await?;

        tracing::info!(uid = %user.uid, "E-mail changed");

        Ok(Outcome::Changed(self.codec.issue(&user)?))
    }

    /// Change the password after re-checking the current one.
    pub async fn change_password(
        &self,
        claims: &IdentityClaims,
        input: PasswordChangeInput,
    ) -> AccountResult<SessionOutput> {
        let email = normalize_text(&input.email);
        if !is_email_valid(&email) {
            return Err(AccountError::InvalidEmail);
        }
        let password = ClearTextPassword::new(input.password)?;
        let new_password = ClearTextPassword::new(input.new_password)?;

        if claims.sub != email {
            return Err(AccountError::BadCredentials);
        }

        let mut user = load_active_user(self.user_repo.as_ref(), &claims.uid).await?;

        if !user.password.verify(&password, self.config.pepper())? {
            return Err(AccountError::BadCredentials);
        }
        // 現在のパスワードは検証済みなので平文比較で足りる
        if new_password.matches(&password) {
            return Err(AccountError::NewPasswordMustDiffer);
        }

        let hashed = new_password.hash(&self.config.hashing, self.config.pepper())?;
        user.set_password(hashed);
        self.user_repo.update_user(&user).await?;

        let token = self.codec.issue(&user)?;
        let socials = self.social_repo.list_socials(&user.id).await?;

        tracing::info!(uid = %user.uid, "Password changed");

        Ok(SessionOutput {
            account: AccountView { user, socials },
            token,
        })
    }
}

//! Sign Up Use Case
//!
//! Creates a new user account and opens its first session.

use std::sync::Arc;

use kernel::validation::{is_email_valid, is_name_valid, normalize_text};
use platform::password::ClearTextPassword;

use crate::application::config::AccountConfig;
use crate::application::credential::SessionCodec;
use crate::application::{AccountView, SessionOutput};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    codec: Arc<SessionCodec>,
    config: Arc<AccountConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, codec: Arc<SessionCodec>, config: Arc<AccountConfig>) -> Self {
        Self {
            user_repo,
            codec,
            config,
        }
    }

    /// 入力検証は name → email → password → username の順で、最初の失敗を返します。
    pub async fn execute(&self, input: SignUpInput) -> AccountResult<SessionOutput> {
        if !is_name_valid(&input.name) {
            return Err(AccountError::InvalidName);
        }
        if !is_email_valid(&input.email) {
            return Err(AccountError::InvalidEmail);
        }
        let password = ClearTextPassword::new(input.password)?;
        if !is_name_valid(&input.username) {
            return Err(AccountError::InvalidUsername);
        }

        let name = normalize_text(&input.name);
        let email = normalize_text(&input.email);
        let username = normalize_text(&input.username);

        if self.user_repo.count_by_username(&username).await? > 0 {
            return Err(AccountError::UsernameTaken);
        }
        if self.user_repo.count_by_email(&email).await? > 0 {
            return Err(AccountError::EmailTaken);
        }

        let hashed = password.hash(&self.config.hashing, self.config.pepper())?;
        let user = User::new(name, username, email, hashed);

        self.user_repo.create_user(&user).await?;
        let token = self.codec.issue(&user)?;

        tracing::info!(
            uid = %user.uid,
            username = %user.username,
            "User signed up"
        );

        Ok(SessionOutput {
            account: AccountView {
                user,
                socials: Vec::new(),
            },
            token,
        })
    }
}

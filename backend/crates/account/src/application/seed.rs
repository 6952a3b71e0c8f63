//! Seed Use Case
//!
//! Startup seeding of the root user and the initial stack catalog.

use std::sync::Arc;

use kernel::validation::fits_meta_description;
use platform::password::ClearTextPassword;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Deserialize;

use crate::application::config::AccountConfig;
use crate::domain::entity::{stack::Stack, user::User};
use crate::domain::repository::{StackRepository, StoreError, UserRepository};
use crate::domain::value_object::role::Role;
use crate::error::{AccountError, AccountResult};

/// Root user to create when missing
#[derive(Debug, Clone)]
pub struct RootUserSeed {
    pub email: String,
    pub name: String,
    pub username: String,
}

/// One entry of the stack seed file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSeed {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub meta_description: String,
}

/// Seed use case
pub struct SeedUseCase<R>
where
    R: UserRepository + StackRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> SeedUseCase<R>
where
    R: UserRepository + StackRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    /// ルートユーザーを作成
    ///
    /// 同じメールアドレスの利用者が既にいる場合は何もせず `None` を返します。
    /// 生成したパスワードはここで一度だけログに出します。
    pub async fn root_user(&self, seed: &RootUserSeed) -> AccountResult<Option<User>> {
        if self.repo.count_by_email(&seed.email).await? > 0 {
            tracing::debug!(email = %seed.email, "Root user already present");
            return Ok(None);
        }

        let raw = generate_root_password();
        let hashed = ClearTextPassword::new(raw.clone())?
            .hash(&self.config.hashing, self.config.pepper())?;

        let mut user = User::new(
            seed.name.clone(),
            seed.username.clone(),
            seed.email.clone(),
            hashed,
        );
        user.email_verified = true;
        user.grant(Role::Root);

        self.repo.create_user(&user).await?;

        tracing::warn!(
            uid = %user.uid,
            username = %user.username,
            password = %raw,
            "Root user created; store this password now, it is not shown again"
        );

        Ok(Some(user))
    }

    /// Insert the seed stacks owned by the root user.
    ///
    /// Entries that collide with an existing stack, or whose meta description
    /// exceeds the column limit, are skipped. Returns the number of stacks
    /// created.
    pub async fn stacks(&self, root_email: &str, seeds: &[StackSeed]) -> AccountResult<usize> {
        if seeds.is_empty() {
            return Ok(0);
        }

        let root = self
            .repo
            .find_by_email(root_email)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let mut created = 0;
        for seed in seeds {
            let meta_description = seed.meta_description.trim();
            if !fits_meta_description(meta_description) {
                tracing::warn!(name = %seed.name, "Seed stack meta description too long, skipped");
                continue;
            }

            let stack = Stack::new(
                seed.name.trim().to_string(),
                seed.description.trim().to_string(),
                meta_description.to_string(),
                root.uid,
            );

            match self.repo.create_stack(&stack).await {
                Ok(()) => created += 1,
                Err(StoreError::UniqueViolation(constraint)) => {
                    tracing::debug!(slug = %stack.slug, constraint = %constraint, "Seed stack already present");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(created, "Stacks seeded");
        Ok(created)
    }
}

/// `Root` + 16 random alphanumerics + `9`
///
/// The fixed affixes guarantee the password policy is met.
fn generate_root_password() -> String {
    let body: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!("Root{body}9")
}

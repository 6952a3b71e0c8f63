//! Stack Use Case
//!
//! Public reads of enabled stacks and the role-gated mutations.

use std::sync::Arc;

use kernel::validation::{
    SLUG_MAX_LENGTH, fits_meta_description, is_meta_description_valid, is_name_valid,
    normalize_text, slugify,
};

use crate::application::Outcome;
use crate::application::credential::IdentityClaims;
use crate::domain::entity::stack::Stack;
use crate::domain::repository::StackRepository;
use crate::error::{AccountError, AccountResult};

/// 一覧取得の既定件数
pub const DEFAULT_TAKE: i64 = 25;

/// Stack creation input
#[derive(Default)]
pub struct StackInput {
    pub name: String,
    pub description: String,
    pub meta_description: String,
}

/// Stack update input (absent fields are left untouched)
#[derive(Default)]
pub struct StackUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub meta_description: Option<String>,
}

/// Stack use case
pub struct StackUseCase<R>
where
    R: StackRepository,
{
    repo: Arc<R>,
}

impl<R> StackUseCase<R>
where
    R: StackRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 有効なスタックの一覧
    ///
    /// ## Arguments
    /// * `take` - 取得件数（未指定・負数なら 25）
    /// * `skip` - 読み飛ばす件数（未指定・負数なら 0）
    pub async fn list(&self, take: Option<i64>, skip: Option<i64>) -> AccountResult<Vec<Stack>> {
        let take = take.filter(|t| *t >= 0).unwrap_or(DEFAULT_TAKE);
        let skip = skip.filter(|s| *s >= 0).unwrap_or(0);

        Ok(self.repo.list_enabled(take, skip).await?)
    }

    /// Find an enabled stack by slug or name.
    pub async fn get(&self, slug_or_name: &str) -> AccountResult<Stack> {
        if slug_or_name.trim().is_empty() {
            return Err(AccountError::StackKeyMissing);
        }

        self.repo
            .find_by_slug_or_name(slug_or_name)
            .await?
            .filter(|stack| stack.enabled)
            .ok_or(AccountError::ResourceNotFound)
    }

    pub async fn create(&self, creator: &IdentityClaims, input: StackInput) -> AccountResult<Stack> {
        let name = normalize_text(&input.name);
        let slug = slugify(&name);
        if !is_name_valid(&name) || slug.is_empty() || slug.len() > SLUG_MAX_LENGTH {
            return Err(AccountError::InvalidStackName);
        }

        // 作成時は空を許可し、上限のみ検査
        let meta_description = normalize_text(&input.meta_description);
        if !fits_meta_description(&meta_description) {
            return Err(AccountError::InvalidStackMetaDescription);
        }

        self.ensure_available(&name, &slug).await?;

        let stack = Stack::new(
            name,
            normalize_text(&input.description),
            meta_description,
            creator.uid,
        );
        self.repo.create_stack(&stack).await?;

        tracing::info!(slug = %stack.slug, created_by = %creator.uid, "Stack created");
        Ok(stack)
    }

    /// Update an enabled stack addressed by slug.
    ///
    /// Renaming re-derives the slug. An invalid meta description is ignored.
    pub async fn update(
        &self,
        slug: &str,
        input: StackUpdateInput,
    ) -> AccountResult<Outcome<Stack>> {
        let mut stack = self.find_enabled(slug).await?;
        let mut changed = false;

        let name = input.name.as_deref().map(normalize_text);
        if let Some(name) = name.filter(|n| !n.is_empty() && *n != stack.name) {
            let new_slug = slugify(&name);
            if !is_name_valid(&name) || new_slug.is_empty() || new_slug.len() > SLUG_MAX_LENGTH {
                return Err(AccountError::InvalidName);
            }
            self.ensure_available(&name, &new_slug).await?;
            stack.rename(name);
            changed = true;
        }

        if let Some(description) = input.description.filter(|d| *d != stack.description) {
            stack.set_description(description);
            changed = true;
        }

        let meta_description = input.meta_description.as_deref().map(normalize_text);
        if let Some(meta_description) = meta_description
            .filter(|m| is_meta_description_valid(m) && *m != stack.meta_description)
        {
            stack.set_meta_description(meta_description);
            changed = true;
        }

        if !changed {
            return Ok(Outcome::Unchanged);
        }

        self.repo.update_stack(&stack).await?;
        tracing::info!(slug = %stack.slug, "Stack updated");

        Ok(Outcome::Changed(stack))
    }

    /// 有効・無効の切り替え
    ///
    /// 現在の状態が既に `enabled` と同じ場合は該当なし（404）になります。
    pub async fn set_enabled(&self, slug: &str, enabled: bool) -> AccountResult<()> {
        if slug.len() > SLUG_MAX_LENGTH {
            return Err(AccountError::ResourceNotFound);
        }

        self.repo.set_stack_enabled(slug, enabled).await?;
        tracing::info!(slug, enabled, "Stack availability changed");
        Ok(())
    }

    async fn find_enabled(&self, slug: &str) -> AccountResult<Stack> {
        if slug.len() > SLUG_MAX_LENGTH {
            return Err(AccountError::ResourceNotFound);
        }

        self.repo
            .find_by_slug(slug)
            .await?
            .filter(|stack| stack.enabled)
            .ok_or(AccountError::ResourceNotFound)
    }

    async fn ensure_available(&self, name: &str, slug: &str) -> AccountResult<()> {
        match self.repo.find_conflicting(name, slug).await? {
            Some(existing) if existing.name == name => Err(AccountError::StackNameTaken),
            Some(_) => Err(AccountError::StackSlugTaken),
            None => Ok(()),
        }
    }
}

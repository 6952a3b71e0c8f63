//! Social Link Use Case
//!
//! Create, edit and remove the signed-in user's external profile links.

use std::sync::Arc;

use kernel::validation::{
    is_details_valid, is_social_identifier_valid, is_url_valid, normalize_text,
};

use crate::application::credential::IdentityClaims;
use crate::application::{Outcome, load_active_user};
use crate::domain::entity::social::Social;
use crate::domain::repository::{SocialRepository, UserRepository};
use crate::error::{AccountError, AccountResult};

/// Social link input
pub struct SocialInput {
    pub identifier: String,
    pub url: String,
    pub details: Option<String>,
}

/// Partial social link update
pub struct SocialPatchInput {
    pub identifier: String,
    pub url: Option<String>,
    pub details: Option<String>,
}

/// Result of an upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted {
    Created(Social),
    Updated(Social),
}

/// Social link use case
pub struct SocialUseCase<U, S>
where
    U: UserRepository,
    S: SocialRepository,
{
    user_repo: Arc<U>,
    social_repo: Arc<S>,
}

impl<U, S> SocialUseCase<U, S>
where
    U: UserRepository,
    S: SocialRepository,
{
    pub fn new(user_repo: Arc<U>, social_repo: Arc<S>) -> Self {
        Self {
            user_repo,
            social_repo,
        }
    }

    /// 識別子が既にあれば更新、無ければ作成
    pub async fn upsert(
        &self,
        claims: &IdentityClaims,
        input: SocialInput,
    ) -> AccountResult<Upserted> {
        let identifier = normalize_text(&input.identifier);
        let url = normalize_text(&input.url);
        let details = input
            .details
            .as_deref()
            .map(normalize_text)
            .unwrap_or_default();

        if !is_social_identifier_valid(&identifier) {
            return Err(AccountError::InvalidSocialIdentifier);
        }
        if !is_url_valid(&url) {
            return Err(AccountError::InvalidUrl);
        }
        if !is_details_valid(&details) {
            return Err(AccountError::InvalidSocialDetails);
        }

        let user = load_active_user(self.user_repo.as_ref(), &claims.uid).await?;

        match self.social_repo.find_social(&user.id, &identifier).await? {
            Some(mut social) => {
                social.set_url(url);
                social.set_details(details);
                self.social_repo.update_social(&social).await?;
                Ok(Upserted::Updated(social))
            }
            None => {
                let social = Social::new(user.id, identifier, url, details);
                self.social_repo.create_social(&social).await?;
                tracing::debug!(uid = %user.uid, identifier = %social.identifier, "Social link created");
                Ok(Upserted::Created(social))
            }
        }
    }

    /// Update url and/or details of an existing link.
    pub async fn patch(
        &self,
        claims: &IdentityClaims,
        input: SocialPatchInput,
    ) -> AccountResult<Outcome<Social>> {
        let identifier = normalize_text(&input.identifier);
        if !is_social_identifier_valid(&identifier) {
            return Err(AccountError::InvalidSocialIdentifier);
        }

        let user = load_active_user(self.user_repo.as_ref(), &claims.uid).await?;
        let mut social = self
            .social_repo
            .find_social(&user.id, &identifier)
            .await?
            .ok_or(AccountError::ResourceNotFound)?;

        let mut changed = false;

        let details = input.details.as_deref().map(normalize_text);
        if let Some(details) = details.filter(|d| !d.is_empty() && *d != social.details) {
            if !is_details_valid(&details) {
                return Err(AccountError::InvalidSocialDetails);
            }
            social.set_details(details);
            changed = true;
        }

        let url = input.url.as_deref().map(normalize_text);
        if let Some(url) = url.filter(|u| !u.is_empty() && *u != social.url) {
            if !is_url_valid(&url) {
                return Err(AccountError::InvalidUrl);
            }
            social.set_url(url);
            changed = true;
        }

        if !changed {
            return Ok(Outcome::Unchanged);
        }

        self.social_repo.update_social(&social).await?;
        Ok(Outcome::Changed(social))
    }

    /// Remove a link; an unknown identifier surfaces as the store's
    /// record-not-found failure.
    pub async fn delete(&self, claims: &IdentityClaims, identifier: &str) -> AccountResult<()> {
        let user = load_active_user(self.user_repo.as_ref(), &claims.uid).await?;
        self.social_repo
            .delete_social(&user.id, &normalize_text(identifier))
            .await?;

        tracing::debug!(uid = %user.uid, identifier, "Social link deleted");
        Ok(())
    }
}

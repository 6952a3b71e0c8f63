//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{AccountView, SessionOutput};
use crate::domain::entity::{social::Social, stack::Stack};
use crate::domain::value_object::{public_id::PublicId, role::Authority};

// ============================================================================
// Account
// ============================================================================

/// Sign up request
///
/// Missing fields deserialize as empty strings and fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Sign in request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
}

/// E-mail change request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateEmailRequest {
    pub email: String,
    pub new_email: String,
    pub password: String,
}

/// Password change request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePasswordRequest {
    pub email: String,
    pub password: String,
    pub new_password: String,
}

/// Public user representation
///
/// Never carries the internal id, the password hash or the status flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub uid: PublicId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    /// `null` は空文字で返す
    pub bio: String,
    pub authorities: Vec<Authority>,
    pub social: Vec<SocialDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AccountView> for UserDto {
    fn from(view: AccountView) -> Self {
        let user = view.user;
        Self {
            uid: user.uid,
            name: user.name,
            username: user.username,
            email: user.email,
            email_verified: user.email_verified,
            bio: user.bio.unwrap_or_default(),
            authorities: user.authorities.into_iter().map(Authority::from).collect(),
            social: view.socials.into_iter().map(SocialDto::from).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// User plus session token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserDto,
    pub token: String,
}

impl From<SessionOutput> for SessionResponse {
    fn from(output: SessionOutput) -> Self {
        Self {
            user: output.account.into(),
            token: output.token,
        }
    }
}

/// Token only
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
}

impl From<String> for TokenResponse {
    fn from(token: String) -> Self {
        Self { token }
    }
}

// ============================================================================
// Social
// ============================================================================

/// Social link upsert request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialRequest {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub url: String,
    pub details: Option<String>,
}

/// Social link partial update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPatchRequest {
    #[serde(default)]
    pub identifier: String,
    pub url: Option<String>,
    pub details: Option<String>,
}

/// Social link removal request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialDeleteRequest {
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialDto {
    pub identifier: String,
    pub details: String,
    pub url: String,
}

impl From<Social> for SocialDto {
    fn from(social: Social) -> Self {
        Self {
            identifier: social.identifier,
            details: social.details,
            url: social.url,
        }
    }
}

// ============================================================================
// Stack
// ============================================================================

/// Stack list query
///
/// Kept as raw strings: non-numeric values fall back to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackListQuery {
    pub take: Option<String>,
    pub skip: Option<String>,
}

/// Stack creation request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackRequest {
    pub name: String,
    pub description: String,
    pub meta_description: String,
}

/// Stack update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackDto {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub meta_description: String,
}

impl From<Stack> for StackDto {
    fn from(stack: Stack) -> Self {
        Self {
            name: stack.name,
            slug: stack.slug,
            description: stack.description,
            meta_description: stack.meta_description,
        }
    }
}

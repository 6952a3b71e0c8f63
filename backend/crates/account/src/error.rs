//! Account Error Types
//!
//! Use-case failures. They carry no language: a failure is turned into a
//! localized [`Exception`] only at the request boundary, where the resolved
//! [`Catalog`] is known.

use std::borrow::Cow;
use std::sync::Arc;

use axum::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::exception::{Exception, RequestInfo};
use kernel::error::kind::ErrorKind;
use kernel::lang::Catalog;
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::application::credential::TokenError;
use crate::domain::repository::StoreError;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid name")]
    InvalidName,

    #[error("Invalid username")]
    InvalidUsername,

    #[error("Invalid e-mail")]
    InvalidEmail,

    /// Password rejected by the strength policy
    #[error("Invalid password")]
    InvalidPassword,

    #[error("New e-mail must differ from the current one")]
    NewEmailMustDiffer,

    #[error("New password must differ from the current one")]
    NewPasswordMustDiffer,

    #[error("Invalid social identifier")]
    InvalidSocialIdentifier,

    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Social details too long")]
    InvalidSocialDetails,

    #[error("Invalid stack name")]
    InvalidStackName,

    /// Meta description over the column limit
    #[error("Stack meta description too long")]
    InvalidStackMetaDescription,

    /// Empty slug-or-name lookup key
    #[error("Stack slug or name not sent")]
    StackKeyMissing,

    /// Credential mismatch during sign-in or re-authentication
    #[error("Invalid credentials")]
    BadCredentials,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// Missing, malformed, invalid or expired session token
    #[error("Session required")]
    SessionRequired,

    /// Account disabled or locked
    #[error("Account is inactive or locked")]
    AccountInactive,

    #[error("User not found")]
    UserNotFound,

    #[error("Resource not found")]
    ResourceNotFound,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("E-mail already exists")]
    EmailTaken,

    #[error("Stack name already exists")]
    StackNameTaken,

    #[error("Stack slug already exists")]
    StackSlugTaken,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),

    #[error("Session token failure: {0}")]
    Token(#[from] TokenError),
}

impl AccountError {
    /// Get the ErrorKind for this error
    ///
    /// 基盤由来の失敗は `None` を返します。
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AccountError::InvalidName
            | AccountError::InvalidUsername
            | AccountError::InvalidEmail
            | AccountError::InvalidPassword
            | AccountError::NewEmailMustDiffer
            | AccountError::NewPasswordMustDiffer
            | AccountError::InvalidSocialIdentifier
            | AccountError::InvalidUrl
            | AccountError::InvalidSocialDetails
            | AccountError::InvalidStackName
            | AccountError::InvalidStackMetaDescription
            | AccountError::StackKeyMissing => Some(ErrorKind::BadRequest),
            AccountError::BadCredentials | AccountError::InsufficientPermissions => {
                Some(ErrorKind::Unauthorized)
            }
            AccountError::SessionRequired | AccountError::AccountInactive => {
                Some(ErrorKind::Forbidden)
            }
            AccountError::UserNotFound | AccountError::ResourceNotFound => {
                Some(ErrorKind::NotFound)
            }
            AccountError::UsernameTaken
            | AccountError::EmailTaken
            | AccountError::StackNameTaken
            | AccountError::StackSlugTaken => Some(ErrorKind::Conflict),
            AccountError::Store(_) | AccountError::PasswordHash(_) | AccountError::Token(_) => {
                None
            }
        }
    }

    /// Status carried by the bare response before localization
    pub fn status_code(&self) -> u16 {
        match (self.kind(), self) {
            (Some(kind), _) => kind.status_code(),
            (None, AccountError::Store(e)) => e.status_code().unwrap_or(500),
            (None, _) => 500,
        }
    }

    /// Localized message of a semantic variant
    fn message(&self, catalog: &'static Catalog) -> Option<Cow<'static, str>> {
        let account = &catalog.account;
        let message = match self {
            AccountError::InvalidName => account.invalid_name,
            AccountError::InvalidUsername => account.invalid_username,
            AccountError::InvalidEmail => account.invalid_email,
            AccountError::InvalidPassword => account.invalid_password,
            AccountError::NewEmailMustDiffer => account.new_email_be_different,
            AccountError::NewPasswordMustDiffer => account.new_password_be_different,
            AccountError::InvalidSocialIdentifier => catalog.social.invalid_identifier,
            AccountError::InvalidUrl => catalog.invalid_url,
            AccountError::InvalidSocialDetails => catalog.social.invalid_details,
            AccountError::InvalidStackName => {
                return Some(Cow::Owned(
                    catalog.invalid_custom_field(catalog.stack.name_field),
                ));
            }
            AccountError::InvalidStackMetaDescription => {
                return Some(Cow::Owned(
                    catalog.invalid_custom_field(catalog.stack.meta_description_field),
                ));
            }
            AccountError::StackKeyMissing => catalog.stack.slug_or_name_not_sent,
            AccountError::BadCredentials => account.unauthorized,
            AccountError::InsufficientPermissions => account.insufficient_permissions,
            AccountError::SessionRequired => catalog.exception.forbidden,
            AccountError::AccountInactive => account.disabled_or_locked,
            AccountError::UserNotFound => account.not_found,
            AccountError::ResourceNotFound => catalog.exception.not_found,
            AccountError::UsernameTaken => account.username_exist,
            AccountError::EmailTaken => account.email_exist,
            AccountError::StackNameTaken => catalog.exception.conflict_entity_already_exists,
            AccountError::StackSlugTaken => catalog.stack.slug_already_exists,
            AccountError::Store(_) | AccountError::PasswordHash(_) | AccountError::Token(_) => {
                return None;
            }
        };
        Some(Cow::Borrowed(message))
    }

    /// 分類済み例外へ変換
    ///
    /// ## Arguments
    /// * `catalog` - リクエストで解決された言語のカタログ
    /// * `request` - 失敗したリクエスト
    pub fn to_exception(&self, catalog: &'static Catalog, request: &RequestInfo) -> Exception {
        if let (Some(kind), Some(message)) = (self.kind(), self.message(catalog)) {
            return Exception::new(kind, message, request);
        }

        match self {
            AccountError::Store(e) => match e.status_code() {
                Some(status) => Exception::classify_by_status(status, catalog, request),
                None => Exception::internal(catalog.exception.internal_server_error, request),
            },
            _ => Exception::internal(catalog.exception.internal_server_error, request),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Store(e) if e.status_code().is_none() => {
                tracing::debug!(error = %e, "Account store failure");
            }
            AccountError::PasswordHash(e) => {
                tracing::debug!(error = %e, "Password hashing failure");
            }
            AccountError::Token(e) => {
                tracing::debug!(error = %e, "Session token failure");
            }
            AccountError::BadCredentials => {
                tracing::warn!("Credential mismatch");
            }
            AccountError::AccountInactive => {
                tracing::warn!("Request on inactive or locked account");
            }
            AccountError::InsufficientPermissions => {
                tracing::warn!("Capability check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl From<PasswordPolicyError> for AccountError {
    fn from(_: PasswordPolicyError) -> Self {
        AccountError::InvalidPassword
    }
}

/// 境界で分類される前の失敗
///
/// 応答の拡張として運ばれ、失敗境界ミドルウェアが言語に応じた例外に置き換えます。
#[derive(Debug, Clone)]
pub struct PendingFailure(pub Arc<AccountError>);

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Extension(PendingFailure(Arc::new(self)))).into_response()
    }
}

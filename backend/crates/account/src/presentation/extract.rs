//! Request Extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::credential::IdentityClaims;
use crate::error::AccountError;

/// 認証ゲートを通過したリクエストの利用者
///
/// [`authenticate`](super::middleware::authenticate) が格納したクレームを取り出します。
/// ゲートの外で使われた場合は 403 になります。
#[derive(Debug, Clone)]
pub struct CurrentUser(pub IdentityClaims);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AccountError::SessionRequired)
    }
}

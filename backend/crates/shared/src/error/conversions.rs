//! Error conversions - HTTP integration for [`Exception`]
//!
//! Behind the `axum` feature: the response conversion, the [`Classified`]
//! marker and [`RequestInfo`] extraction.

#[cfg(feature = "axum")]
use super::exception::{Exception, RequestInfo};
#[cfg(feature = "axum")]
use crate::lang::Locale;

/// 分類済み例外から生成されたレスポンスに付く拡張マーカー
///
/// 終端ハンドラはこのマーカーを持つレスポンスをそのまま通します。
#[cfg(feature = "axum")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Exception {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if let Some(source) = std::error::Error::source(&self) {
            tracing::error!(
                status = self.status_code(),
                method = %self.method(),
                url = %self.url(),
                source = %source,
                "{}",
                self.message()
            );
        } else {
            tracing::debug!(
                status = self.status_code(),
                method = %self.method(),
                url = %self.url(),
                "{}",
                self.message()
            );
        }

        let mut response = (status, Json(self.serialize())).into_response();
        response.extensions_mut().insert(Classified);
        response
    }
}

#[cfg(feature = "axum")]
impl RequestInfo {
    /// リクエストからメソッドと URL を取得
    ///
    /// ネストされたルーターでもプレフィックスを含む URL を記録するため、
    /// `OriginalUri` があればそちらを使います。
    pub fn from_request<B>(request: &http::Request<B>) -> Self {
        Self::capture(request.method(), request.uri(), request.extensions())
    }

    pub fn from_parts(parts: &http::request::Parts) -> Self {
        Self::capture(&parts.method, &parts.uri, &parts.extensions)
    }

    fn capture(method: &http::Method, uri: &http::Uri, extensions: &http::Extensions) -> Self {
        let uri = extensions
            .get::<axum::extract::OriginalUri>()
            .map(|original| &original.0)
            .unwrap_or(uri);
        Self::new(method.as_str(), uri.to_string())
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for RequestInfo
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// 言語ミドルウェアが設定したロケール（未設定ならデフォルト）
#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Locale>().copied().unwrap_or_default())
    }
}

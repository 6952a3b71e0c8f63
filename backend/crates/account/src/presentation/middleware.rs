//! Request Pipeline Middleware
//!
//! Language resolution, the authentication and authorization gates, and the
//! single failure boundary that turns every failed response into a localized
//! [`Exception`] body.

use std::any::Any;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::Classified;
use kernel::error::exception::{Exception, RequestInfo};
use kernel::lang::{LanguageConfig, Locale};

use crate::application::credential::{IdentityClaims, SessionCodec};
use crate::domain::value_object::role::CapabilityTier;
use crate::error::{AccountError, PendingFailure};

/// Authorization スキーム（末尾の空白を含む完全一致）
const BEARER_PREFIX: &str = "Bearer ";

/// 設定されたヘッダーから言語を解決し、リクエスト拡張に格納
pub async fn language(
    State(config): State<Arc<LanguageConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let tag = req
        .headers()
        .get(config.header_name())
        .and_then(|value| value.to_str().ok());
    let locale = config.resolve(tag);

    req.extensions_mut().insert(locale);
    next.run(req).await
}

/// Authentication gate
///
/// Requires `Authorization: Bearer <token>`. Any failure is a 403; on success
/// the verified [`IdentityClaims`] are attached to the request.
pub async fn authenticate(
    State(codec): State<Arc<SessionCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccountError> {
    let claims = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .and_then(|token| codec.verify(token))
        .ok_or(AccountError::SessionRequired)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Authorization gate
///
/// Runs after [`authenticate`]. Missing claims count as failing the tier.
pub async fn authorize(
    State(tier): State<CapabilityTier>,
    req: Request,
    next: Next,
) -> Result<Response, AccountError> {
    let permitted = req
        .extensions()
        .get::<IdentityClaims>()
        .is_some_and(|claims| tier.permits(claims.roles()));

    if !permitted {
        tracing::debug!(%tier, "Capability tier not met");
        return Err(AccountError::InsufficientPermissions);
    }

    Ok(next.run(req).await)
}

/// 失敗境界
///
/// - 分類済みの応答はそのまま通す
/// - 未分類の [`AccountError`] は解決済み言語で例外に変換
/// - ステータスしか持たない失敗（フレームワークの拒否、405 など）は
///   ステータスから分類
pub async fn failure_boundary(req: Request, next: Next) -> Response {
    let locale = req.extensions().get::<Locale>().copied().unwrap_or_default();
    let request = RequestInfo::from_request(&req);

    let mut response = next.run(req).await;

    if response.extensions().get::<Classified>().is_some() {
        return response;
    }

    if let Some(PendingFailure(error)) = response.extensions_mut().remove::<PendingFailure>() {
        let exception = error.to_exception(locale.strings(), &request);
        let exception = if exception.is_server_error() {
            exception.with_source(error)
        } else {
            exception
        };
        return exception.into_response();
    }

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut classified =
        Exception::classify_by_status(status.as_u16(), locale.strings(), &request).into_response();
    if let Some(allow) = allow {
        classified.headers_mut().insert(header::ALLOW, allow);
    }
    classified
}

/// Panic handler for `CatchPanicLayer`
///
/// Returns a bare 500; the failure boundary classifies it.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!(panic = %detail, "Handler panicked");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// Unmatched routes
pub async fn not_found(locale: Locale, request: RequestInfo) -> Exception {
    Exception::not_found(locale.strings().exception.not_found, &request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::Request as HttpRequest;
    use axum::middleware::from_fn;
    use axum::routing::get;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_boundary_classifies_bare_status() {
        let app = Router::new()
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .route("/gone", get(|| async { StatusCode::NOT_FOUND }))
            .layer(from_fn(failure_boundary));

        let response = app
            .clone()
            .oneshot(HttpRequest::get("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Unknown error");
        assert_eq!(body["url"], "/teapot");

        let response = app
            .oneshot(HttpRequest::get("/gone").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"], kernel::lang::locales::PT_BR.exception.not_found);
    }

    #[tokio::test]
    async fn test_boundary_passes_success_through() {
        let app = Router::new()
            .route("/ok", get(|| async { "fine" }))
            .layer(from_fn(failure_boundary));

        let response = app
            .oneshot(HttpRequest::get("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"fine");
    }

    #[test]
    fn test_handle_panic_is_bare_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<Classified>().is_none());
    }
}

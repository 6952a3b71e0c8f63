//! Exception - Classified, client-facing failure
//!
//! Defines [`Exception`], the single representation of a failure that reaches
//! a client, together with the request context it captures ([`RequestInfo`])
//! and its wire body ([`ExceptionBody`]).

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::kind::ErrorKind;
use crate::lang::Catalog;

/// 分類表に無いステータスコードに使うメッセージ
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// 失敗したリクエストのメソッドと URL
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestInfo {
    pub method: String,
    pub url: String,
}

impl RequestInfo {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }
}

/// レスポンスボディ
///
/// ステータスコードはボディに含めず、HTTP ステータス行でのみ伝えます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionBody {
    pub message: String,
    pub method: String,
    pub url: String,
    /// ISO-8601（UTC、ミリ秒精度）
    pub timestamp: String,
}

/// 分類済み例外
///
/// クライアントに返される失敗はすべてこの型の1インスタンスです。
/// 構築時にリクエストのメソッド・URL・時刻を記録し、以降は変更されません。
///
/// ## Examples
/// ```rust
/// use kernel::error::exception::{Exception, RequestInfo};
/// use kernel::error::kind::ErrorKind;
///
/// let request = RequestInfo::new("GET", "/v1/stacks/rust");
/// let err = Exception::not_found("Stack not found", &request);
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.kind(), Some(ErrorKind::NotFound));
///
/// let body = err.serialize();
/// assert_eq!(body.method, "GET");
/// assert_eq!(body.url, "/v1/stacks/rust");
/// ```
pub struct Exception {
    /// ステータスコード（`kind` が無い場合も保持）
    status: u16,
    /// 分類（分類表外のステータスでは `None`）
    kind: Option<ErrorKind>,
    message: Cow<'static, str>,
    method: String,
    url: String,
    timestamp: DateTime<Utc>,
    /// 元のエラー（ログ用、クライアントには出さない）
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl Exception {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 種別とメッセージから例外を作成
    ///
    /// ## Arguments
    /// * `kind` - エラー種別
    /// * `message` - ローカライズ済みメッセージ
    /// * `request` - 失敗したリクエスト
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>, request: &RequestInfo) -> Self {
        Self::build(kind.status_code(), Some(kind), message.into(), request)
    }

    /// 分類表に無いステータスで例外を作成
    ///
    /// ステータスが分類表にある場合は種別も設定されます。
    pub fn with_status(
        status: u16,
        message: impl Into<Cow<'static, str>>,
        request: &RequestInfo,
    ) -> Self {
        Self::build(status, ErrorKind::from_status(status), message.into(), request)
    }

    /// ステータスコードだけが分かる失敗を分類
    ///
    /// 分類表にあるコードはその種別の汎用メッセージ、
    /// それ以外は同じコードで `"Unknown error"` になります。
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::exception::{Exception, RequestInfo};
    /// use kernel::lang::locales::PT_BR;
    ///
    /// let request = RequestInfo::new("DELETE", "/v1/account/social");
    /// let err = Exception::classify_by_status(404, &PT_BR, &request);
    /// assert_eq!(err.message(), PT_BR.exception.not_found);
    ///
    /// let err = Exception::classify_by_status(418, &PT_BR, &request);
    /// assert_eq!(err.status_code(), 418);
    /// assert_eq!(err.message(), "Unknown error");
    /// ```
    pub fn classify_by_status(status: u16, catalog: &Catalog, request: &RequestInfo) -> Self {
        match ErrorKind::from_status(status) {
            Some(kind) => Self::new(kind, catalog.generic_message(kind), request),
            None => Self::with_status(status, UNKNOWN_ERROR_MESSAGE, request),
        }
    }

    fn build(
        status: u16,
        kind: Option<ErrorKind>,
        message: Cow<'static, str>,
        request: &RequestInfo,
    ) -> Self {
        Self {
            status,
            kind,
            message,
            method: request.method.clone(),
            url: request.url.clone(),
            timestamp: Utc::now(),
            source: None,
        }
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// 404 Not Found
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>, request: &RequestInfo) -> Self {
        Self::new(ErrorKind::NotFound, message, request)
    }

    /// 500 Internal Server Error
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>, request: &RequestInfo) -> Self {
        Self::new(ErrorKind::InternalServerError, message, request)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// 元のエラーを設定（ログ用）
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> Option<ErrorKind> {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.status
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// サーバーエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// ワイヤ表現を生成
    pub fn serialize(&self) -> ExceptionBody {
        ExceptionBody {
            message: self.message.to_string(),
            method: self.method.clone(),
            url: self.url.clone(),
            timestamp: self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("Exception");
        builder.field("status", &self.status);
        builder.field("message", &self.message);
        builder.field("method", &self.method);
        builder.field("url", &self.url);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "[{}] {}", kind, self.message),
            None => write!(f, "[{}] {}", self.status, self.message),
        }
    }
}

impl Error for Exception {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

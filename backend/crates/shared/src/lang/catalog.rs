//! String Catalog
//!
//! A catalog is a fixed, nested set of user-facing messages for one language.
//! Every entry is a static string except [`ExceptionStrings::invalid_custom_field`],
//! which is a single-argument formatter.

use crate::error::kind::ErrorKind;

/// 言語ごとのメッセージカタログ
///
/// フィールド構成は全言語で共通です。
/// `static` として定義され、リクエスト間で共有されます。
#[derive(Debug)]
pub struct Catalog {
    /// 言語タグ（例: `pt-BR`）
    pub code: &'static str,
    pub invalid_url: &'static str,
    pub exception: ExceptionStrings,
    pub account: AccountStrings,
    pub social: SocialStrings,
    pub stack: StackStrings,
}

/// Generic per-status messages plus the templated field message
#[derive(Debug)]
pub struct ExceptionStrings {
    pub bad_request: &'static str,
    pub unauthorized: &'static str,
    pub forbidden: &'static str,
    pub not_found: &'static str,
    pub method_not_allowed: &'static str,
    pub conflict: &'static str,
    pub conflict_entity_already_exists: &'static str,
    pub unprocessable_entity: &'static str,
    pub internal_server_error: &'static str,
    pub not_implemented: &'static str,
    pub service_unavailable: &'static str,
    /// フィールド名を1つ受け取り文章に埋め込む唯一のテンプレート
    pub invalid_custom_field: fn(&str) -> String,
}

#[derive(Debug)]
pub struct AccountStrings {
    pub invalid_name: &'static str,
    pub invalid_username: &'static str,
    pub invalid_email: &'static str,
    pub invalid_password: &'static str,
    pub username_exist: &'static str,
    pub email_exist: &'static str,
    pub not_found: &'static str,
    pub unauthorized: &'static str,
    pub disabled_or_locked: &'static str,
    pub new_email_be_different: &'static str,
    pub new_password_be_different: &'static str,
    pub insufficient_permissions: &'static str,
}

#[derive(Debug)]
pub struct SocialStrings {
    pub invalid_identifier: &'static str,
    pub invalid_details: &'static str,
}

#[derive(Debug)]
pub struct StackStrings {
    pub slug_or_name_not_sent: &'static str,
    pub slug_already_exists: &'static str,
    /// `invalid_custom_field` に渡すフィールド名
    pub name_field: &'static str,
    pub meta_description_field: &'static str,
}

impl Catalog {
    /// 種別ごとの汎用メッセージ
    pub fn generic_message(&self, kind: ErrorKind) -> &'static str {
        let e = &self.exception;
        match kind {
            ErrorKind::BadRequest => e.bad_request,
            ErrorKind::Unauthorized => e.unauthorized,
            ErrorKind::Forbidden => e.forbidden,
            ErrorKind::NotFound => e.not_found,
            ErrorKind::MethodNotAllowed => e.method_not_allowed,
            ErrorKind::Conflict => e.conflict,
            ErrorKind::UnprocessableEntity => e.unprocessable_entity,
            ErrorKind::InternalServerError => e.internal_server_error,
            ErrorKind::NotImplemented => e.not_implemented,
            ErrorKind::ServiceUnavailable => e.service_unavailable,
        }
    }

    /// Format the templated invalid-field message.
    pub fn invalid_custom_field(&self, field: &str) -> String {
        (self.exception.invalid_custom_field)(field)
    }
}

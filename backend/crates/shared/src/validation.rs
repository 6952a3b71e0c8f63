//! Validation Predicates
//!
//! Pure boolean checks applied to request input before any persistence
//! access, plus the text normalizers used alongside them.

use unicode_normalization::UnicodeNormalization;

/// 名前・ユーザー名の最小文字数（trim後）
pub const NAME_MIN_LENGTH: usize = 2;

/// ソーシャルリンク識別子の最大文字数
pub const SOCIAL_IDENTIFIER_MAX_LENGTH: usize = 32;

/// ソーシャルリンク詳細の最大文字数
pub const SOCIAL_DETAILS_MAX_LENGTH: usize = 255;

/// メタディスクリプションの最大文字数
pub const META_DESCRIPTION_MAX_LENGTH: usize = 160;

/// スラッグの最大長
pub const SLUG_MAX_LENGTH: usize = 100;

/// 名前（ユーザー名にも適用）
pub fn is_name_valid(name: &str) -> bool {
    name.trim().chars().count() >= NAME_MIN_LENGTH
}

/// E-mail address: `local@domain.tld`
///
/// ## Examples
/// ```rust
/// use kernel::validation::is_email_valid;
/// assert!(is_email_valid("a@b.com"));
/// assert!(is_email_valid("  first.last+tag@mail.example.org "));
/// assert!(!is_email_valid("a@b"));
/// assert!(!is_email_valid("a@b.c"));
/// ```
pub fn is_email_valid(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
    {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// リンク URL
///
/// `https://` または `www.` で始まる必要があります（`http:` は拒否）。
///
/// ## Examples
/// ```rust
/// use kernel::validation::is_url_valid;
/// assert!(is_url_valid("https://github.com/someone"));
/// assert!(is_url_valid("www.example.com"));
/// assert!(!is_url_valid("http://example.com"));
/// assert!(!is_url_valid("ftp://example.com"));
/// ```
pub fn is_url_valid(url: &str) -> bool {
    if url.starts_with("http:") || url.chars().any(char::is_whitespace) {
        return false;
    }

    let rest = match url.strip_prefix("https://") {
        Some(rest) => rest,
        None if url.starts_with("www.") => url,
        None => return false,
    };

    let host = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();

    let Some((name, tld)) = host.rsplit_once('.') else {
        return false;
    };

    !name.is_empty()
        && !name.starts_with(['.', '-'])
        && name != "www"
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'))
        && tld.len() >= 2
}

/// ソーシャルリンク識別子: 1〜32文字の `[A-Za-z0-9_-]`
pub fn is_social_identifier_valid(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier.len() <= SOCIAL_IDENTIFIER_MAX_LENGTH
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}

/// ソーシャルリンク詳細
pub fn is_details_valid(details: &str) -> bool {
    details.chars().count() <= SOCIAL_DETAILS_MAX_LENGTH
}

/// メタディスクリプション（空文字不可）
pub fn is_meta_description_valid(text: &str) -> bool {
    !text.trim().is_empty() && fits_meta_description(text.trim())
}

/// 作成時のメタディスクリプション（空文字可、上限のみ）
pub fn fits_meta_description(text: &str) -> bool {
    text.chars().count() <= META_DESCRIPTION_MAX_LENGTH
}

/// 前後の空白を除去
pub fn normalize_text(text: &str) -> String {
    text.trim().to_string()
}

/// 名前から URL スラッグを生成
///
/// アクセント記号を除去して小文字化し、英数字以外の区切りを `-` にまとめます。
///
/// ## Examples
/// ```rust
/// use kernel::validation::slugify;
/// assert_eq!(slugify("Programação Funcional"), "programacao-funcional");
/// assert_eq!(slugify("  C++ / Rust  "), "c-rust");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.nfd().filter(char::is_ascii) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_ascii_whitespace() || matches!(c, '-' | '_' | '/' | '.') {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert!(is_name_valid("Jo"));
        assert!(is_name_valid("  Maria  "));
        assert!(!is_name_valid(" J "));
        assert!(!is_name_valid(""));
    }

    #[test]
    fn test_email() {
        assert!(is_email_valid("user@example.com"));
        assert!(is_email_valid("user.name-1@sub.example.co"));
        assert!(!is_email_valid("userexample.com"));
        assert!(!is_email_valid("@example.com"));
        assert!(!is_email_valid("user@.com"));
        assert!(!is_email_valid("user@exa mple.com"));
        assert!(!is_email_valid("user@example.c0m"));
    }

    #[test]
    fn test_url() {
        assert!(is_url_valid("https://www.linkedin.com/in/someone"));
        assert!(is_url_valid("https://x.com"));
        assert!(is_url_valid("www.site.dev/path?q=1"));
        assert!(!is_url_valid("http://www.site.dev"));
        assert!(!is_url_valid("https://localhost"));
        assert!(!is_url_valid("https://exa mple.com"));
        assert!(!is_url_valid("site.dev"));
        assert!(!is_url_valid(""));
    }

    #[test]
    fn test_social_identifier() {
        assert!(is_social_identifier_valid("github"));
        assert!(is_social_identifier_valid("my_site-2"));
        assert!(!is_social_identifier_valid(""));
        assert!(!is_social_identifier_valid("has space"));
        assert!(!is_social_identifier_valid(&"a".repeat(33)));
    }

    #[test]
    fn test_details_and_meta_description() {
        assert!(is_details_valid(""));
        assert!(is_details_valid(&"x".repeat(255)));
        assert!(!is_details_valid(&"x".repeat(256)));

        assert!(is_meta_description_valid("Systems language"));
        assert!(!is_meta_description_valid("   "));
        assert!(!is_meta_description_valid(&"x".repeat(161)));

        assert!(fits_meta_description(""));
        assert!(fits_meta_description(&"é".repeat(160)));
        assert!(!fits_meta_description(&"x".repeat(161)));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rust"), "rust");
        assert_eq!(slugify("Node.js"), "node-js");
        assert_eq!(slugify("Ciência de Dados"), "ciencia-de-dados");
        assert_eq!(slugify("--a__b--"), "a-b");
        assert_eq!(slugify("C#"), "c");
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  a b  "), "a b");
    }
}

//! Language Resolver
//!
//! Picks the catalog for a request from a single configurable header.
//! Matching is exact (case-sensitive) against the configured language list;
//! anything else falls back to the default language.

use thiserror::Error;

use super::catalog::Catalog;
use super::locales::{EN_US, PT_BR};

/// Header consulted when none is configured
pub const DEFAULT_LANGUAGE_HEADER: &str = "accept-language";

/// 組み込みカタログ一覧
const BUILTIN: [&Catalog; 2] = [&PT_BR, &EN_US];

/// Language configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageConfigError {
    /// No built-in catalog exists for the tag
    #[error("Unsupported language: {0}")]
    Unsupported(String),

    /// Header name is empty
    #[error("Language header name cannot be empty")]
    EmptyHeaderName,
}

/// 対応言語（言語タグとカタログの組）
#[derive(Debug, Clone, Copy)]
pub struct Language {
    catalog: &'static Catalog,
}

impl Language {
    /// 組み込みカタログから言語を検索
    pub fn builtin(code: &str) -> Option<Self> {
        BUILTIN
            .iter()
            .find(|c| c.code == code)
            .map(|catalog| Self { catalog })
    }

    pub fn code(&self) -> &'static str {
        self.catalog.code
    }
}

/// リクエスト単位で解決された言語
///
/// 言語ミドルウェアがリクエスト拡張に格納し、以降は読み取り専用です。
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    catalog: &'static Catalog,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        self.catalog.code
    }

    /// 解決済みカタログ
    pub fn strings(&self) -> &'static Catalog {
        self.catalog
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self { catalog: &PT_BR }
    }
}

impl From<Language> for Locale {
    fn from(language: Language) -> Self {
        Self {
            catalog: language.catalog,
        }
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Locale {}

/// 言語解決の設定
///
/// 起動時に一度だけ構築され、以降は変更されません。
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    header_name: String,
    supported: Vec<Language>,
    default: Language,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            header_name: DEFAULT_LANGUAGE_HEADER.to_string(),
            supported: BUILTIN.iter().map(|&catalog| Language { catalog }).collect(),
            default: Language { catalog: &PT_BR },
        }
    }
}

impl LanguageConfig {
    /// Build a configuration from language tags.
    ///
    /// ## Arguments
    /// * `header_name` - 言語タグを読むヘッダー名（大文字小文字は区別しない）
    /// * `supported` - 受け付ける言語タグ
    /// * `default_code` - フォールバック言語（常に受け付け対象に含まれる）
    pub fn new<I, S>(
        header_name: &str,
        supported: I,
        default_code: &str,
    ) -> Result<Self, LanguageConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let header_name = header_name.trim().to_ascii_lowercase();
        if header_name.is_empty() {
            return Err(LanguageConfigError::EmptyHeaderName);
        }

        let default = Language::builtin(default_code)
            .ok_or_else(|| LanguageConfigError::Unsupported(default_code.to_string()))?;

        let mut languages = vec![default];
        for code in supported {
            let code = code.as_ref().trim();
            if code.is_empty() {
                continue;
            }
            let language = Language::builtin(code)
                .ok_or_else(|| LanguageConfigError::Unsupported(code.to_string()))?;
            if !languages.iter().any(|l| l.code() == language.code()) {
                languages.push(language);
            }
        }

        Ok(Self {
            header_name,
            supported: languages,
            default,
        })
    }

    /// 小文字化済みのヘッダー名
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    pub fn default_locale(&self) -> Locale {
        self.default.into()
    }

    pub fn supported_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.supported.iter().map(|l| l.code())
    }

    /// ヘッダー値から言語を解決
    ///
    /// `None`（ヘッダー無し・値が文字列として読めない）や未対応のタグは
    /// デフォルト言語になります。比較は大文字小文字を区別します。
    pub fn resolve(&self, tag: Option<&str>) -> Locale {
        tag.and_then(|tag| self.supported.iter().find(|l| l.code() == tag))
            .copied()
            .unwrap_or(self.default)
            .into()
    }
}

//! Localization
//!
//! Flat string catalogs keyed by language tag, and the resolver that picks
//! one per request.

pub mod catalog;
pub mod locales;
pub mod resolver;

pub use catalog::Catalog;
pub use resolver::{Language, LanguageConfig, Locale};

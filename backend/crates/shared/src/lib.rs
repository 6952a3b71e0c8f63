//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - The classified failure taxonomy and its wire representation
//! - Localized string catalogs and the language resolver
//! - Common primitive value objects (ID types, etc.)
//! - Cross-cutting validation rules
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod conversions;
    pub mod exception;
    pub mod kind;
}
pub mod id;
pub mod lang;
pub mod validation;

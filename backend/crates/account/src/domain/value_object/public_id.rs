//! PublicId Value Object
//!
//! The user's `uid`: the only identifier that leaves the service (token
//! claims, resource ownership). It wraps a Nanoid for compact, URL-safe IDs.
//!
//! ## Usage
//! ```rust
//! use account::domain::value_object::public_id::PublicId;
//!
//! let public_id = PublicId::new();
//! assert_eq!(public_id.as_str().len(), 21);
//! ```
use std::str::FromStr;

use nid::Nanoid;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid PublicId: {0}")]
pub struct PublicIdError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicId(pub Nanoid);

impl PublicId {
    #[inline]
    pub fn new() -> Self {
        Self(Nanoid::new())
    }

    #[inline]
    pub fn parse_str(s: &str) -> Result<Self, PublicIdError> {
        Nanoid::from_str(s)
            .map(PublicId)
            .map_err(|e| PublicIdError(e.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for PublicId {
    type Err = PublicIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PublicId::parse_str(s)
    }
}

impl Default for PublicId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PublicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_parse_str() {
        let id_str = "0123456789abcdefghi01";
        let public_id = PublicId::parse_str(id_str).unwrap();
        assert_eq!(public_id.as_str(), id_str);
        assert_eq!(public_id.to_string(), id_str);
    }

    #[test]
    fn test_public_id_parse_str_invalid() {
        assert!(PublicId::parse_str("invalid_id!@#").is_err());
        assert!(PublicId::parse_str("").is_err());
    }

    #[test]
    fn test_public_id_serializes_as_string() {
        let public_id = PublicId::parse_str("0123456789abcdefghi01").unwrap();
        let json = serde_json::to_string(&public_id).unwrap();
        assert_eq!(json, "\"0123456789abcdefghi01\"");

        let back: PublicId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, public_id);
    }
}

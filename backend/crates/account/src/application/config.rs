//! Application Configuration
//!
//! Configuration for the account application layer. Built once at startup
//! and shared read-only.

use std::fmt;
use std::time::Duration;

use platform::password::HashingParams;

/// Session token validity
pub const SESSION_TTL: Duration = Duration::from_secs(2 * 24 * 3600);

/// Session token configuration
#[derive(Clone)]
pub struct TokenConfig {
    /// HS256 signing secret (required)
    pub secret: Vec<u8>,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: Vec::new(),
            issuer: "http://localhost:31113".to_string(),
            audience: "account-service".to_string(),
            ttl: SESSION_TTL,
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Account application configuration
#[derive(Debug, Clone, Default)]
pub struct AccountConfig {
    pub token: TokenConfig,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2 cost
    pub hashing: HashingParams,
}

impl AccountConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token: TokenConfig {
                secret,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create config for development (random secret, cheap hashing)
    pub fn development() -> Self {
        Self {
            hashing: HashingParams::minimal(),
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

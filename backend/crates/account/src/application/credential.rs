//! Credential Codec
//!
//! Issues and verifies stateless HS256 session tokens. A token carries the
//! [`IdentityClaims`] of one user plus issued-at, expiry, issuer and audience.
//! Verification never tells the caller why a token was refused.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::TokenConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::{
    public_id::PublicId,
    role::{Authority, Role},
};

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// No signing secret configured (fatal at startup)
    #[error("JWT secret not configured")]
    MissingSecret,

    /// Validity window cannot be represented
    #[error("Invalid token validity window")]
    InvalidTtl,

    #[error("Token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// 検証済みトークンから復元される利用者情報
///
/// 永続化されず、リクエストごとにトークンから導出されます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub uid: PublicId,
    pub name: String,
    pub username: String,
    pub authorities: Vec<Authority>,
    /// 検証済み主体（メールアドレス）
    pub sub: String,
    /// メールアドレス確認済みフラグ
    pub verified: bool,
}

impl IdentityClaims {
    pub fn from_user(user: &User) -> Self {
        Self {
            uid: user.uid,
            name: user.name.clone(),
            username: user.username.clone(),
            authorities: user.authorities.iter().copied().map(Authority::from).collect(),
            sub: user.email.clone(),
            verified: user.email_verified,
        }
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.authorities.iter().map(|a| a.descriptor)
    }
}

/// Wire payload: identity plus registered claims
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    identity: IdentityClaims,
    iat: i64,
    exp: i64,
    iss: String,
    aud: String,
}

/// セッショントークンの発行と検証
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl: TimeDelta,
}

impl SessionCodec {
    /// Build the codec from configuration.
    ///
    /// An empty secret is a configuration error.
    pub fn new(config: &TokenConfig) -> Result<Self, TokenError> {
        if config.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        let ttl = TimeDelta::from_std(config.ttl).map_err(|_| TokenError::InvalidTtl)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        // 有効期限は verify_at で秒単位に判定する
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            header: Header::new(Algorithm::HS256),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl,
        })
    }

    /// Issue a token for `user`, valid from now.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as if signed at `now`.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = SessionClaims {
            identity: IdentityClaims::from_user(user),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        Ok(encode(&self.header, &claims, &self.encoding_key)?)
    }

    /// Verify a token now; `None` on any failure.
    pub fn verify(&self, token: &str) -> Option<IdentityClaims> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature, issuer, audience and expiry at `now`.
    ///
    /// A token expiring at `T` is accepted up to and including `T`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<IdentityClaims> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if data.claims.exp < now.timestamp() => {
                tracing::debug!(
                    uid = %data.claims.identity.uid,
                    exp = data.claims.exp,
                    "Session token expired"
                );
                None
            }
            Ok(data) => Some(data.claims.identity),
            Err(e) => {
                tracing::warn!(error = %e, "Session token verification failed");
                None
            }
        }
    }
}

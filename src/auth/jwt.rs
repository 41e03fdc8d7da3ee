//! Session token issuing and verification
//! HS256-signed JWTs carrying the user id and an absolute expiry

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The only algorithm accepted on verification.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

const MIN_SECRET_LEN: usize = 32;

/// JWT claims for session tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// Why a presented token was refused.
///
/// Only ever logged; clients see a single "not logged in" answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not verify")]
    BadSignature,

    #[error("token was signed with an unexpected algorithm")]
    WrongAlgorithm,

    #[error("token has expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                TokenError::WrongAlgorithm
            }
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::Unauthorized
    }
}

/// Token service
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    /// Create token service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();
        let lifetime = Duration::seconds(config.security.token_lifetime_secs as i64);

        Self::new(secret.as_bytes(), lifetime)
    }

    pub fn new(secret: &[u8], lifetime: Duration) -> Result<Self, AppError> {
        // HS256 needs a key at least as long as the digest
        if secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime,
        })
    }

    /// Default lifetime of issued tokens
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for `subject` using the configured lifetime
    pub fn issue(&self, subject: &Uuid) -> Result<String, AppError> {
        self.issue_with_lifetime(subject, self.lifetime)
    }

    pub fn issue_with_lifetime(&self, subject: &Uuid, lifetime: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + lifetime;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {:?}", e);
            AppError::Internal(format!("Failed to encode session token: {}", e))
        })
    }

    /// Verify a token and return the user id it was issued for
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        // jsonwebtoken accepts exp == now; a token is only valid strictly before its expiry
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Malformed)
    }
}

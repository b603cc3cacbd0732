//! Signed session tokens (HS256 JWT)

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AuthError;

pub const SESSION_TTL_DAYS: i64 = 7;

/// Token payload. Only the admin id is carried besides the standard timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "adminId")]
    pub admin_id: i64,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionToken {
    pub token: String,
}

/// Process-wide signing material shared by the issuer and the guard.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn sign(&self, admin_id: i64, issued_at: DateTime<Utc>) -> Result<SessionToken, AuthError> {
        let expires_at = issued_at
            .checked_add_signed(Duration::days(SESSION_TTL_DAYS))
            .context("session expiry out of range")?;
        let claims = SessionClaims {
            admin_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("failed to sign session token")?;
        Ok(SessionToken { token })
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        match decode::<SessionClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => {
                let reason = match err.kind() {
                    ErrorKind::ExpiredSignature => "expired",
                    ErrorKind::InvalidSignature => "bad signature",
                    _ => "malformed",
                };
                debug!(reason, "session token rejected: {err}");
                Err(AuthError::InvalidToken)
            }
        }
    }
}

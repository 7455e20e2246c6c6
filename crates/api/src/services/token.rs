//! Bearer token issuing and verification.
//!
//! Tokens are HS256 JWTs signed with the configured secret. Verification
//! checks both the signature and the expiry claim; a forged or expired
//! token is rejected, never silently accepted.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use corduroy_core::{Email, UserId};

use crate::models::User;

/// Errors from bearer token handling.
#[derive(Debug, Error)]
pub enum TokenError {
    /// No usable bearer token in the request.
    #[error("bearer token is required")]
    Missing,

    /// Signature, expiry, or structural verification failed.
    #[error("invalid token")]
    Verification(#[from] jsonwebtoken::errors::Error),

    /// Token verified but a required claim is absent.
    #[error("token is missing the {0} claim")]
    MissingClaim(&'static str),

    /// Token could not be signed.
    #[error("token signing failed")]
    Signing,
}

/// Identity claims carried by an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject: the user id.
    pub sub: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Optional so that introspection can report its absence instead of
    /// failing structural validation.
    pub email: Option<Email>,
    pub phone: String,
    pub show_age: bool,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme word is skipped; the second whitespace-separated token is the
/// credential.
///
/// # Errors
///
/// Returns `TokenError::Missing` if the header is absent or carries no
/// credential after the scheme.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, TokenError> {
    let header = header.ok_or(TokenError::Missing)?;
    header.split_whitespace().nth(1).ok_or(TokenError::Missing)
}

/// Issues and verifies identity tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the signing secret.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_hours: i64) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Sign an identity token for a user.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: Some(user.email.clone()),
            phone: user.phone.clone(),
            show_age: user.show_age,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| TokenError::Signing)
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Verification` for forged, expired, or malformed
    /// tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use corduroy_core::{Role, Sex};

    use super::*;

    fn secret() -> SecretString {
        SecretString::from("kD93mVx2pQ8rT5wY7zB4nF6hJ1sL0aGc")
    }

    fn sample_user() -> User {
        User {
            id: UserId::generate(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            phone: "5550100".to_string(),
            role: Role::Buyer,
            sex: Sex::Unknown,
            birthday: String::new(),
            country: String::new(),
            city: String::new(),
            avatar: String::new(),
            show_age: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let service = TokenService::new(&secret(), 24);
        let user = sample_user();

        let token = service.issue(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.first_name, "Ada");
        assert_eq!(claims.email, Some(user.email));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenService::new(&secret(), 24);
        let verifier = TokenService::new(
            &SecretString::from("q8Zr5Tw2Yx9Vb4Nm7Kj3Hf6Gd1Sa0Plc"),
            24,
        );

        let token = issuer.issue(&sample_user()).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(TokenError::Verification(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL puts exp well past the default validation leeway.
        let service = TokenService::new(&secret(), -2);

        let token = service.issue(&sample_user()).unwrap();
        assert!(matches!(
            service.verify(&token),
            Err(TokenError::Verification(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = TokenService::new(&secret(), 24);
        assert!(service.verify("not.a.jwt").is_err());
        assert!(service.verify("").is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = TokenService::new(&secret(), 24);
        let token = service.issue(&sample_user()).unwrap();

        // Flip a character in the payload segment
        let mut tampered = token.clone().into_bytes();
        let mid = token.len() / 2;
        tampered[mid] = if tampered[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();

        assert!(service.verify(&tampered).is_err());
    }

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert!(matches!(parse_bearer(None), Err(TokenError::Missing)));
        assert!(matches!(parse_bearer(Some("Bearer")), Err(TokenError::Missing)));
        assert!(matches!(parse_bearer(Some("")), Err(TokenError::Missing)));
    }
}

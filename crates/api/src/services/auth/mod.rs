//! Authentication service.
//!
//! Registration and credential verification. Passwords are hashed with
//! Argon2id; successful signup and signin both answer with a signed bearer
//! token.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use corduroy_core::Email;

use crate::db::RepositoryError;
use crate::db::users::{CreateUser, UserRepository};
use crate::services::token::TokenService;

/// Parameters for registering a new account.
pub struct RegisterParams {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, tokens: &'a TokenService) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Register a new account and its empty cart; returns a signed token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if email or password is empty.
    /// Returns `AuthError::InvalidEmail` if the email is malformed.
    /// Returns `AuthError::UserAlreadyExists` if the email is registered.
    pub async fn register(&self, params: RegisterParams) -> Result<String, AuthError> {
        if params.email.is_empty() || params.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let email = Email::parse(&params.email)?;

        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(&params.password)?;

        let (user, _cart) = self
            .users
            .create_with_cart(CreateUser {
                first_name: params.first_name,
                last_name: params.last_name,
                phone: params.phone,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // Races with a concurrent signup land on the unique constraint
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(self.tokens.issue(&user)?)
    }

    /// Verify credentials and return a signed token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or
    /// the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(self.tokens.issue(&user)?)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("hunter2hunter2").unwrap();

        assert!(verify_password("hunter2hunter2", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong-password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();

        // Fresh salt per hash; equal inputs must not share ciphertext
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}

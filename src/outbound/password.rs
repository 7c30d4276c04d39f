use crate::domain::auth::{CredentialError, CredentialHasher};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

/// Argon2id adapter for the credential hashing port.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self {}
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("failed to hash password: {}", e);
                CredentialError::HashError
            })?;

        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(password_hash).map_err(|e| {
            tracing::error!("stored password hash is malformed: {}", e);
            CredentialError::HashError
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

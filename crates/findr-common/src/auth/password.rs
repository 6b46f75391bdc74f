//! Stored credentials for the in-process identity provider
//!
//! Passwords are kept as Argon2id PHC strings. The cost parameters are
//! embedded in each string, so hashes made with different costs still
//! verify.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use findr_core::DomainError;

use crate::config::ConfigError;
use crate::error::AppError;

/// Argon2id hasher with fixed cost parameters
#[derive(Debug, Clone)]
pub struct PasswordService {
    params: Params,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService {
    /// Library default costs
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Custom memory (KiB) and iteration costs
    pub fn with_costs(memory_kib: u32, iterations: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| ConfigError::InvalidValue("ARGON2_COSTS", e.to_string()))?;
        Ok(Self { params })
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(anyhow::anyhow!("Password hashing failed: {e}")))
    }

    /// `Ok(false)` on a wrong password; `Err` only if `stored` is not a PHC
    /// string
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Stored credential unreadable: {e}")))?;
        Ok(self
            .hasher()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// A wrong password becomes the provider's invalid-credential rejection
    pub fn verify_or_error(&self, password: &str, stored: &str) -> Result<(), AppError> {
        if self.verify(password, stored)? {
            Ok(())
        } else {
            Err(AppError::Domain(DomainError::InvalidCredential))
        }
    }
}

//! Argon2id implementation of the password hashing port.
//!
//! Defaults follow the OWASP recommendation: m=19456 (19 MiB), t=2, p=1.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rolegate_application::PasswordHasher as PasswordHasherPort;
use rolegate_core::{AppError, AppResult};

const OWASP_MEMORY_KIB: u32 = 19_456;
const OWASP_ITERATIONS: u32 = 2;
const OWASP_PARALLELISM: u32 = 1;

/// Argon2id password hasher for directory accounts.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the recommended parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(OWASP_MEMORY_KIB, OWASP_ITERATIONS, OWASP_PARALLELISM)
            .unwrap_or_else(|_| Self::from_params(Params::default()))
    }

    /// Creates a hasher with explicit cost parameters.
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> AppResult<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None).map_err(|error| {
            AppError::Validation(format!("invalid argon2 parameters: {error}"))
        })?;

        Ok(Self::from_params(params))
    }

    fn from_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| AppError::Internal(format!("failed to hash password: {error}")))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash).map_err(|error| {
            AppError::Internal(format!("stored password hash is malformed: {error}"))
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(AppError::Internal(format!(
                "password verification failed: {error}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use rolegate_application::PasswordHasher as PasswordHasherPort;
    use rolegate_core::{AppError, AppResult};

    use super::Argon2PasswordHasher;

    fn fast_hasher() -> AppResult<Argon2PasswordHasher> {
        Argon2PasswordHasher::with_params(1024, 1, 1)
    }

    #[test]
    fn hash_and_verify_correct_password() -> AppResult<()> {
        let hasher = fast_hasher()?;
        let hash = hasher.hash_password("demo-password")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("demo-password", &hash)?);
        Ok(())
    }

    #[test]
    fn verify_wrong_password_returns_false() -> AppResult<()> {
        let hasher = fast_hasher()?;
        let hash = hasher.hash_password("correct-password")?;

        assert!(!hasher.verify_password("wrong-password", &hash)?);
        Ok(())
    }

    #[test]
    fn same_password_gets_distinct_salts() -> AppResult<()> {
        let hasher = fast_hasher()?;

        assert_ne!(
            hasher.hash_password("secret1")?,
            hasher.hash_password("secret1")?
        );
        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_internal_error() -> AppResult<()> {
        let hasher = fast_hasher()?;

        assert!(matches!(
            hasher.verify_password("secret1", "plaintext"),
            Err(AppError::Internal(_))
        ));
        Ok(())
    }

    #[test]
    fn zero_iterations_are_rejected() {
        assert!(Argon2PasswordHasher::with_params(1024, 0, 1).is_err());
    }
}

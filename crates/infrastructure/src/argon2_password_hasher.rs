//! Argon2id password hashing.
//!
//! Parameters follow the OWASP password storage baseline:
//! m=19456 (19 MiB), t=2, p=1.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use fleetdesk_application::PasswordHasher as PasswordHasherPort;
use fleetdesk_core::{AppError, AppResult};

const MEMORY_COST_KIB: u32 = 19_456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Argon2id implementation of the password hashing port.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the account password parameters.
    #[must_use]
    pub fn new() -> Self {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
            .unwrap_or_else(|_| Params::default());

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
        let stored = PasswordHash::new(hash).map_err(|error| {
            AppError::Internal(format!("stored password hash is unreadable: {error}"))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &stored) {
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
    use fleetdesk_application::PasswordHasher as PasswordHasherPort;
    use fleetdesk_core::{AppError, AppResult};

    use super::Argon2PasswordHasher;

    #[test]
    fn verifies_only_the_original_password() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("fleet-manager-2026")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("fleet-manager-2026", &hash)?);
        assert!(!hasher.verify_password("fleet-manager-2027", &hash)?);
        Ok(())
    }

    #[test]
    fn salts_every_hash() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash_password("same password twice")?;
        let second = hasher.hash_password("same password twice")?;

        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn garbage_hash_is_an_internal_error() {
        let hasher = Argon2PasswordHasher::new();
        assert!(matches!(
            hasher.verify_password("whatever", "not-a-phc-string"),
            Err(AppError::Internal(_))
        ));
    }
}

//! Password hashing and verification (Argon2id).
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! the cost parameters travel with each hash and old hashes keep verifying
//! after the configured cost changes.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::AuthError;

/// Input hashed at startup to produce the dummy hash checked for unknown users.
const DUMMY_PASSWORD: &str = "restcart-dummy-password";

/// Hashes and checks passwords.
///
/// Holds a pre-computed hash that [`CredentialVerifier::verify_stored`] checks
/// against when there is no stored hash, so a lookup miss costs as much as a
/// wrong password.
#[derive(Clone)]
pub struct CredentialVerifier {
    argon2: Argon2<'static>,
    dummy_hash: String,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("params", self.argon2.params())
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier {
    /// Create a verifier with explicit Argon2id cost parameters.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashParams` if the parameters are out of range.
    /// Returns `AuthError::PasswordHash` if the dummy hash cannot be computed.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(AuthError::HashParams)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, DUMMY_PASSWORD)?;
        Ok(Self { argon2, dummy_hash })
    }

    /// Hash a password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        hash_with(&self.argon2, password)
    }

    /// Check a password against a PHC hash string.
    ///
    /// A malformed hash never matches.
    #[must_use]
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Check a password against a hash that may not exist.
    ///
    /// With `None` the dummy hash is verified and the result discarded, so
    /// both failure paths do the same work and both return `false`.
    #[must_use]
    pub fn verify_stored(&self, password: &str, stored: Option<&str>) -> bool {
        match stored {
            Some(hash) => self.verify(password, hash),
            None => {
                let _ = self.verify(password, &self.dummy_hash);
                false
            }
        }
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fast_verifier() -> CredentialVerifier {
        CredentialVerifier::new(Params::MIN_M_COST, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let verifier = fast_verifier();
        let hash = verifier.hash("testpassword").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verifier.verify("testpassword", &hash));
        assert!(!verifier.verify("WRONG PASSWORD", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let verifier = fast_verifier();
        let a = verifier.hash("same").unwrap();
        let b = verifier.hash("same").unwrap();
        assert_ne!(a, b);
        assert!(verifier.verify("same", &a));
        assert!(verifier.verify("same", &b));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let verifier = fast_verifier();
        let hash = verifier.hash("plaintext-secret").unwrap();
        assert!(!hash.contains("plaintext-secret"));
    }

    #[test]
    fn test_malformed_hash_does_not_match() {
        let verifier = fast_verifier();
        assert!(!verifier.verify("anything", "not-a-phc-string"));
        assert!(!verifier.verify("anything", ""));
    }

    #[test]
    fn test_verify_stored_is_uniform_on_failure() {
        let verifier = fast_verifier();
        let hash = verifier.hash("adminpassword").unwrap();

        let unknown_user = verifier.verify_stored("adminpassword", None);
        let wrong_password = verifier.verify_stored("WRONG PASSWORD", Some(&hash));
        assert!(!unknown_user);
        assert_eq!(unknown_user, wrong_password);

        assert!(verifier.verify_stored("adminpassword", Some(&hash)));
    }

    #[test]
    fn test_dummy_password_does_not_authenticate_unknown_user() {
        let verifier = fast_verifier();
        assert!(!verifier.verify_stored(DUMMY_PASSWORD, None));
    }

    #[test]
    fn test_hash_from_other_params_still_verifies() {
        let old = CredentialVerifier::new(Params::MIN_M_COST, 1, 1).unwrap();
        let new = CredentialVerifier::new(Params::MIN_M_COST * 2, 2, 1).unwrap();
        let hash = old.hash("pw").unwrap();
        assert!(new.verify("pw", &hash));
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            CredentialVerifier::new(0, 0, 0),
            Err(AuthError::HashParams(_))
        ));
    }
}

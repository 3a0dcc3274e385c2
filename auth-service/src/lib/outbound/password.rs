use auth::PasswordError;
use auth::PasswordHasher;

use crate::domain::account::ports::PasswordVerifier;

/// Argon2id adapter for the password port.
#[derive(Clone, Default)]
pub struct Argon2PasswordVerifier {
    hasher: PasswordHasher,
}

impl Argon2PasswordVerifier {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self { hasher }
    }
}

impl PasswordVerifier for Argon2PasswordVerifier {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        self.hasher.hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        self.hasher.verify(password, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_opaque_and_verifiable() {
        let verifier = Argon2PasswordVerifier::new(
            PasswordHasher::with_params(1024, 1, 1).expect("Invalid params"),
        );

        let hash = verifier.hash("pw123").unwrap();
        assert!(!hash.contains("pw123"));
        assert!(verifier.verify("pw123", &hash).unwrap());
        assert!(!verifier.verify("pw124", &hash).unwrap());
    }
}

//! bcrypt implementation of the core password encoder.

use mall_core::errors::DomainError;
use mall_core::services::PasswordEncoder;

/// Password encoder backed by bcrypt
#[derive(Debug, Clone)]
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl BcryptPasswordEncoder {
    /// Create an encoder with an explicit work factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String, DomainError> {
        bcrypt::hash(raw, self.cost).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            DomainError::internal(format!("Failed to hash password: {}", e))
        })
    }

    fn matches(&self, raw: &str, encoded: &str) -> Result<bool, DomainError> {
        match bcrypt::verify(raw, encoded) {
            Ok(valid) => Ok(valid),
            Err(e) => {
                tracing::warn!("Stored password hash could not be verified: {}", e);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let encoder = BcryptPasswordEncoder::new(4);

        let hash = encoder.encode("password1!").unwrap();

        assert_ne!(hash, "password1!");
        assert!(encoder.matches("password1!", &hash).unwrap());
        assert!(!encoder.matches("wrong", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_does_not_match() {
        let encoder = BcryptPasswordEncoder::new(4);

        assert!(!encoder.matches("password1!", "not-a-bcrypt-hash").unwrap());
    }
}

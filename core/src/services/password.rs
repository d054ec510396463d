//! Password hashing abstraction.
//!
//! The concrete hasher lives in the infrastructure crate; services only see
//! this trait so tests can run with a cheap encoder.

use crate::errors::DomainResult;

/// One-way password encoder
pub trait PasswordEncoder: Send + Sync {
    /// Hash a raw password
    fn encode(&self, raw: &str) -> DomainResult<String>;

    /// Check a raw password against a stored hash
    fn matches(&self, raw: &str, encoded: &str) -> DomainResult<bool>;
}

//! Adapters behind the mall core traits.
//!
//! [`MySqlStorage`] implements every repository over one SQLx pool, and
//! [`BcryptPasswordEncoder`] hashes member passwords. The MySQL half sits
//! behind the default `mysql` feature.

#[cfg(feature = "mysql")]
pub mod database;
pub mod password;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlStorage, PoolStatistics};
pub use password::BcryptPasswordEncoder;

/// Failures raised while talking to MySQL or setting it up
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Bad URL or option in `DatabaseConfig`
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for mall_core::errors::DomainError {
    fn from(err: InfrastructureError) -> Self {
        mall_core::errors::DomainError::custom(mall_shared::ErrorCode::DatabaseError).with_source(err)
    }
}

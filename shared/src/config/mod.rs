//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Storage backend selection and MySQL pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::{DatabaseConfig, StorageBackend};
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Startup sample data generation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    /// Load sample data when the application starts
    #[serde(default)]
    pub enabled: bool,

    /// Number of random members to create
    #[serde(default = "default_seed_members")]
    pub members: usize,

    /// Number of random products to create
    #[serde(default = "default_seed_products")]
    pub products: usize,

    /// Number of random todos to create
    #[serde(default = "default_seed_todos")]
    pub todos: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            members: default_seed_members(),
            products: default_seed_products(),
            todos: default_seed_todos(),
        }
    }
}

impl SeedConfig {
    /// Enabled seeding with the default volumes
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Sample data configuration
    #[serde(default)]
    pub seed: SeedConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Test | Environment::Staging => Self {
                environment: env,
                logging: LoggingConfig::for_environment(env),
                seed: SeedConfig::default(),
                ..Self::development()
            },
        }
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            database: DatabaseConfig::in_memory(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
            seed: SeedConfig::enabled(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: DatabaseConfig::new("mysql://prod-db:3306/mall").with_max_connections(50),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
            seed: SeedConfig::default(),
        }
    }

    /// Apply the plain `SERVER_*`, `DATABASE_*` and `SEED_SAMPLE_DATA`
    /// variables on top of `self`
    pub fn apply_env_shortcuts(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        self.database.apply_env();
        if let Some(enabled) = std::env::var("SEED_SAMPLE_DATA")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.seed.enabled = enabled;
        }
    }
}

fn default_seed_members() -> usize {
    100
}

fn default_seed_products() -> usize {
    100
}

fn default_seed_todos() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert!(config.seed.enabled);
    }

    #[test]
    fn test_production_defaults() {
        let config = AppConfig::production();
        assert!(config.database.is_mysql());
        assert_eq!(config.database.max_connections, 50);
        assert!(!config.seed.enabled);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_test_and_staging_derive_from_development() {
        for env in [Environment::Test, Environment::Staging] {
            let config = AppConfig::for_environment(env);
            assert_eq!(config.environment, env);
            assert_eq!(config.database.backend, StorageBackend::Memory);
            assert!(!config.seed.enabled);
        }
        assert_eq!(AppConfig::for_environment(Environment::Test).logging.level, "warn");
        assert_eq!(AppConfig::for_environment(Environment::Staging).logging.level, "info");
    }

    #[test]
    fn test_round_trips_through_serde() {
        let config = AppConfig::development();
        let json = serde_json::to_value(&config).unwrap();
        let restored: AppConfig = serde_json::from_value(json).unwrap();
        assert_eq!(restored.server.bind_address(), config.server.bind_address());
        assert_eq!(restored.seed.members, 100);
    }
}

//! Configuration loading
//!
//! Layers, lowest precedence first:
//! 1. built-in defaults for the environment selected by `APP_ENV`
//! 2. `config/{environment}.toml`, when present
//! 3. `MALL__SECTION__KEY` environment variables
//! 4. plain shortcuts such as `SERVER_PORT` and `DATABASE_URL`

use config::{Config, ConfigError, File};
use mall_shared::{AppConfig, Environment};

const ENV_PREFIX: &str = "MALL";
const ENV_SEPARATOR: &str = "__";

/// Load the configuration for the environment named by `APP_ENV`
pub fn load() -> Result<AppConfig, ConfigError> {
    let mut config = layered(Environment::from_env())?;
    config.apply_env_shortcuts();
    Ok(config)
}

/// Defaults, optional file and prefixed environment variables for `env`
pub fn layered(env: Environment) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::for_environment(env);

    Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(&env.config_file()).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mall_shared::StorageBackend;

    #[test]
    fn test_layered_defaults_without_file() {
        let config = layered(Environment::Production).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "warn");
        assert!(!config.seed.enabled);
    }

    #[test]
    fn test_development_keeps_data_in_memory() {
        let config = layered(Environment::Development).unwrap();
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert!(config.seed.enabled);
    }
}

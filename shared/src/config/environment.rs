//! Deployment environment and the logging defaults tied to it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Variable naming the environment; defaults to development
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    /// Automated test runs: in-memory storage, no seeding, quiet logs
    Test,
    Staging,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 4] = [
        Environment::Development,
        Environment::Test,
        Environment::Staging,
        Environment::Production,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Read `APP_ENV`; unset or unknown values fall back to development
    pub fn from_env() -> Self {
        std::env::var(ENVIRONMENT_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Base name of the optional file layered over the defaults, e.g. `config/staging`
    pub fn config_file(&self) -> String {
        format!("config/{}", self.as_str())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "test" | "testing" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Settings for the `env_logger` builder in the server binary
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,

    #[serde(default = "default_timestamp")]
    pub timestamp: bool,

    /// Prefix each line with the module path of the call site
    #[serde(default)]
    pub module_path: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Staging)
    }
}

impl LoggingConfig {
    pub fn for_environment(env: Environment) -> Self {
        let (level, module_path) = match env {
            Environment::Development => ("debug", true),
            Environment::Test => ("warn", true),
            Environment::Staging => ("info", false),
            Environment::Production => ("warn", false),
        };
        Self {
            level: level.to_string(),
            timestamp: default_timestamp(),
            module_path,
        }
    }
}

fn default_timestamp() -> bool {
    true
}

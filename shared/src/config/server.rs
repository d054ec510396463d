//! HTTP listener and CORS settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Front-end dev servers accepted when no origins are configured
const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

const METHODS: [&str; 6] = ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// actix worker count; 0 keeps the actix default of one per core
    #[serde(default)]
    pub workers: usize,

    /// Keep-alive in seconds
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u64,

    /// Largest JSON body accepted, in bytes
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", 8080)
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            workers: 0,
            keep_alive: default_keep_alive(),
            max_payload_size: default_max_payload_size(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// `host:port` for `HttpServer::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Exact origins, or a single `*` for any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,

    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,

    /// Preflight cache lifetime in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allow_credentials: default_allow_credentials(),
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Any origin, without credentials
    pub fn permissive() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: false,
            ..Self::default()
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn default_keep_alive() -> u64 {
    75
}

fn default_max_payload_size() -> usize {
    1024 * 1024
}

fn default_allowed_origins() -> Vec<String> {
    DEV_ORIGINS.iter().map(|origin| origin.to_string()).collect()
}

fn default_allowed_methods() -> Vec<String> {
    METHODS.iter().map(|method| method.to_string()).collect()
}

fn default_allow_credentials() -> bool {
    true
}

fn default_max_age() -> usize {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.workers, 0);
        assert_eq!(config.keep_alive(), Duration::from_secs(75));
        assert_eq!(config.max_payload_size, 1024 * 1024);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"host":"127.0.0.1","port":3000}"#).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.keep_alive, 75);

        let config = config.with_workers(2);
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn test_cors_defaults_list_dev_origins() {
        let config = CorsConfig::default();
        assert!(config.allowed_origins.contains(&"http://localhost:3000".to_string()));
        assert!(config.allowed_methods.contains(&"PATCH".to_string()));
        assert!(config.allow_credentials);
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_permissive_drops_credentials() {
        let config = CorsConfig::permissive();
        assert!(config.allows_any_origin());
        assert!(!config.allow_credentials);
        assert_eq!(config.max_age, 3600);
    }
}

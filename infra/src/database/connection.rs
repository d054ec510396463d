//! MySQL pool for the mall schema
//!
//! [`DatabasePool::new`] connects with the limits from [`DatabaseConfig`],
//! verifies the connection and, unless disabled, brings the schema up to date
//! from `infra/migrations`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use tracing::log::LevelFilter;

use mall_shared::DatabaseConfig;

use crate::InfrastructureError;

const SLOW_STATEMENT: Duration = Duration::from_secs(1);

/// Shared MySQL pool plus the settings it was opened with
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Open the pool, check it answers and apply pending migrations
    ///
    /// # Errors
    /// * `Config` for an unparsable URL
    /// * `Database` when no connection can be established
    /// * `Migration` when a migration fails
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = connect_options(&config)?;
        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Opening MySQL pool"
        );

        let pool = pool_options(&config).connect_with(options).await.map_err(|e| {
            tracing::error!("Could not open MySQL pool: {}", e);
            InfrastructureError::Database(e)
        })?;

        let database = Self { pool, config };
        database.ping().await?;
        if database.config.run_migrations {
            database.run_migrations().await?;
        }
        Ok(database)
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        tracing::debug!("MySQL ping succeeded");
        Ok(())
    }

    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Schema migrations applied");
        Ok(())
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.config.max_connections,
        }
    }

    /// Wait for checked-out connections and close the pool
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("MySQL pool closed");
    }
}

/// Parse the URL and apply statement logging
fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, InfrastructureError> {
    let options = MySqlConnectOptions::from_str(&config.url)
        .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

    Ok(if config.enable_logging {
        options
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, SLOW_STATEMENT)
    } else {
        options.disable_statement_logging()
    })
}

fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .test_before_acquire(true)
}

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}

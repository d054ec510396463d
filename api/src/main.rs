use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::{fmt::TimestampPrecision, Env};
use log::info;

use mall_api::{config, create_app, seed, AppState};
use mall_core::repositories::{InMemoryStorage, Storage};
use mall_infra::{BcryptPasswordEncoder, DatabasePool, MySqlStorage};
use mall_shared::{AppConfig, LoggingConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = config::load().context("failed to load configuration")?;
    init_logging(&config.logging);

    info!("Starting mall API server ({})", config.environment);

    match config.database.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            serve(InMemoryStorage::new(), config).await
        }
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("failed to connect to MySQL")?;
            info!("Connected to MySQL: {}", pool.statistics());
            let result = serve(MySqlStorage::new(&pool), config).await;
            pool.close().await;
            result
        }
    }
}

fn init_logging(logging: &LoggingConfig) {
    let timestamp = logging.timestamp.then_some(TimestampPrecision::Millis);
    env_logger::Builder::from_env(Env::default().default_filter_or(logging.level.as_str()))
        .format_timestamp(timestamp)
        .format_module_path(logging.module_path)
        .init();
}

async fn serve<S: Storage>(storage: S, config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::new(&storage, Arc::new(BcryptPasswordEncoder::default()))
        .with_cors(config.cors.clone())
        .with_json_limit(config.server.max_payload_size);

    if config.seed.enabled {
        seed::run(&state, &config.seed)
            .await
            .context("failed to load sample data")?;
    }

    let state = web::Data::new(state);
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()))
        .keep_alive(config.server.keep_alive());
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}

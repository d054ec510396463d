//! Liveness endpoint

use actix_web::web;
use mall_shared::HealthResponse;

use crate::handlers::AxResponseEntity;

pub const SERVICE_NAME: &str = "mall-api";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

async fn health_check() -> AxResponseEntity<HealthResponse> {
    AxResponseEntity::ok(
        HealthResponse::up(SERVICE_NAME, env!("CARGO_PKG_VERSION")),
        "서비스가 정상적으로 동작 중입니다.",
    )
}

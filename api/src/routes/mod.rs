//! Route registration for every feature
//!
//! Each feature module exposes a `configure` function registering its
//! scope under `/api/v1`.

pub mod cart;
pub mod health;
pub mod member;
pub mod product;
pub mod role;
pub mod sample;
pub mod todo;

use actix_web::web;
use mall_core::repositories::Storage;

pub const API_PREFIX: &str = "/api/v1";

/// Register `/health` and the `/api/v1` scope
pub fn configure<S: Storage>(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).service(
        web::scope(API_PREFIX)
            .configure(todo::configure::<S>)
            .configure(product::configure::<S>)
            .configure(member::configure::<S>)
            .configure(role::configure::<S>)
            .configure(cart::configure::<S>)
            .configure(sample::configure::<S>),
    );
}

//! Application factory
//!
//! Builds the actix-web `App` over any storage backend so the server binary
//! and the HTTP tests share one wiring.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App,
};
use mall_core::repositories::Storage;
use mall_shared::ErrorCode;

use crate::handlers::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::handlers::AxResponseEntity;
use crate::middleware::{create_cors, RequestContext};
use crate::routes;
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<S: Storage>(
    app_state: web::Data<AppState<S>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = create_cors(&app_state.cors);
    let json_config = web::JsonConfig::default()
        .limit(app_state.json_limit)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        // Last wrap runs first: request id, then CORS, then access logging
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(RequestContext)
        .configure(routes::configure::<S>)
        .default_service(web::route().to(not_found))
}

async fn not_found() -> AxResponseEntity<()> {
    AxResponseEntity::not_found(ErrorCode::ResourceNotFound)
}

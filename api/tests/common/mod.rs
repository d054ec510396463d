//! Helpers shared by the HTTP tests
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, test, web};
use mall_api::AppState;
use mall_core::repositories::InMemoryStorage;
use mall_infra::BcryptPasswordEncoder;
use serde_json::Value;

pub const MEMBER_EMAIL: &str = "user1@mall.com";

/// Fresh in-memory state; bcrypt runs at its minimum cost
pub fn state() -> web::Data<AppState<InMemoryStorage>> {
    let storage = InMemoryStorage::new();
    web::Data::new(AppState::new(&storage, Arc::new(BcryptPasswordEncoder::new(4))))
}

/// Status and parsed envelope of a response
pub async fn read<B: MessageBody>(resp: ServiceResponse<B>) -> (u16, Value) {
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// Assert the envelope is a failure carrying `code` with a matching `statusCode`
pub fn assert_error(status: u16, body: &Value, expected_status: u16, code: &str) {
    assert_eq!(status, expected_status, "unexpected status for {}", body);
    assert_eq!(body["statusCode"], expected_status);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], code);
}

pub fn member_body(email: &str, nickname: &str) -> Value {
    serde_json::json!({
        "email": email,
        "password": "password123",
        "nickname": nickname,
    })
}

pub fn product_body(name: &str, price: i64) -> Value {
    serde_json::json!({
        "productName": name,
        "price": price,
        "stockQuantity": 10,
        "images": ["main.jpg"],
    })
}

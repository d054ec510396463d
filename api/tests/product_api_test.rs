//! HTTP tests for `/api/v1/products`

mod common;

use actix_web::test;
use mall_api::create_app;
use serde_json::json;

use common::{assert_error, product_body, read};

#[actix_web::test]
async fn test_create_and_get_product() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(product_body("무선 키보드", 35000))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "상품이 성공적으로 등록되었습니다.");
    assert_eq!(body["data"]["category"], "기본");
    assert_eq!(body["data"]["images"], json!(["main.jpg"]));

    let uri = format!("/api/v1/products/{}", body["data"]["id"]);
    let req = test::TestRequest::get().uri(&uri).to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["productName"], "무선 키보드");
    assert_eq!(body["data"]["price"], 35000);
}

#[actix_web::test]
async fn test_negative_price_is_rejected() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(json!({ "productName": "키보드", "price": -1 }))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;

    assert_error(status, &body, 400, "V001");
    assert_eq!(body["error"]["fieldErrors"][0]["field"], "price");
    assert_eq!(body["error"]["fieldErrors"][0]["rejectedValue"], -1);
}

#[actix_web::test]
async fn test_soft_delete_and_restore() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(product_body("모니터", 200000))
        .to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    let uri = format!("/api/v1/products/{}", body["data"]["id"]);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "상품이 성공적으로 삭제되었습니다.");

    let req = test::TestRequest::get().uri(&uri).to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_error(status, &body, 404, "P001");

    let req = test::TestRequest::get().uri("/api/v1/products").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["totalElements"], 0);

    let req = test::TestRequest::patch().uri(&format!("{}/restore", uri)).to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["deleted"], false);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let (status, _) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
}

#[actix_web::test]
async fn test_update_product() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(product_body("의자", 50000))
        .to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    let uri = format!("/api/v1/products/{}", body["data"]["id"]);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "price": 45000, "description": "할인 중" }))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "상품 정보가 성공적으로 수정되었습니다.");
    assert_eq!(body["data"]["price"], 45000);
    assert_eq!(body["data"]["description"], "할인 중");
    assert_eq!(body["data"]["productName"], "의자");
}

#[actix_web::test]
async fn test_search_and_price_range() {
    let app = test::init_service(create_app(common::state())).await;

    for (name, price) in [("게이밍 마우스", 30000), ("무선 마우스", 15000), ("노트북", 1200000)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/products")
            .set_json(product_body(name, price))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/products/search?keyword=%EB%A7%88%EC%9A%B0%EC%8A%A4")
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["totalElements"], 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/products/price-range?minPrice=10000&maxPrice=50000")
        .to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["message"], "가격 범위 상품을 성공적으로 조회했습니다.");
    assert_eq!(body["data"]["totalElements"], 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/products/price-range?minPrice=50000&maxPrice=10000")
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_error(status, &body, 400, "C001");
}

#[actix_web::test]
async fn test_missing_product_returns_not_found() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::get().uri("/api/v1/products/42").to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_error(status, &body, 404, "P001");
}

//! HTTP tests for `/api/v1/todos`

mod common;

use actix_web::test;
use mall_api::create_app;
use serde_json::json;

use common::{assert_error, read};

#[actix_web::test]
async fn test_get_missing_todo_returns_not_found() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::get().uri("/api/v1/todos/999").to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;

    assert_error(status, &body, 404, "T001");
    assert_eq!(body["error"]["hscode"], "NOT_FOUND");
    assert_eq!(body["error"]["details"], "할일번호 999에 해당하는 할일을 찾을 수 없습니다.");
    assert_eq!(body["path"], "/api/v1/todos/999");
}

#[actix_web::test]
async fn test_create_without_title_is_rejected() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/todos")
        .set_json(json!({ "writer": "user1" }))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;

    assert_error(status, &body, 400, "V001");
    assert_eq!(body["message"], "입력값 검증에 실패했습니다");
    let fields = body["error"]["fieldErrors"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["field"], "title");
    assert_eq!(fields[0]["message"], "제목은 필수입니다.");
}

#[actix_web::test]
async fn test_create_todo() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/todos")
        .insert_header(("X-Member-Email", "user1@mall.com"))
        .set_json(json!({ "title": "X", "writer": "Y" }))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;

    assert_eq!(status, 201);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["statusText"], "Created");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "할일이 성공적으로 생성되었습니다.");
    assert_eq!(body["data"]["title"], "X");
    assert_eq!(body["data"]["writer"], "Y");
    assert_eq!(body["data"]["complete"], false);
    assert_eq!(body["data"]["createdBy"], "user1@mall.com");
    assert!(body.get("error").is_none());
}

#[actix_web::test]
async fn test_double_toggle_restores_completion() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/todos")
        .set_json(json!({ "title": "토글", "writer": "user1" }))
        .to_request();
    let (_, created) = read(test::call_service(&app, req).await).await;
    let tno = created["data"]["tno"].as_i64().unwrap();
    let uri = format!("/api/v1/todos/{}/toggle", tno);

    let req = test::TestRequest::patch().uri(&uri).to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["complete"], true);

    let req = test::TestRequest::patch().uri(&uri).to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["complete"], false);
    assert_eq!(body["message"], "할일 상태가 성공적으로 변경되었습니다.");
}

#[actix_web::test]
async fn test_update_and_delete() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/todos")
        .set_json(json!({ "title": "원래 제목", "writer": "user1" }))
        .to_request();
    let (_, created) = read(test::call_service(&app, req).await).await;
    let uri = format!("/api/v1/todos/{}", created["data"]["tno"]);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "title": "바뀐 제목", "complete": true }))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "바뀐 제목");
    assert_eq!(body["data"]["writer"], "user1");
    assert_eq!(body["data"]["complete"], true);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "할일이 성공적으로 삭제되었습니다.");
    assert!(body.get("data").is_none());

    let req = test::TestRequest::get().uri(&uri).to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_error(status, &body, 404, "T001");
}

#[actix_web::test]
async fn test_list_pages_newest_first() {
    let app = test::init_service(create_app(common::state())).await;

    for i in 1..=5 {
        let req = test::TestRequest::post()
            .uri("/api/v1/todos")
            .set_json(json!({ "title": format!("할일 {}", i), "writer": "user1" }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/v1/todos?page=0&size=2").to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    let page = &body["data"];
    assert_eq!(page["totalElements"], 5);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["first"], true);
    assert_eq!(page["last"], false);
    assert_eq!(page["content"].as_array().unwrap().len(), 2);
    assert_eq!(page["content"][0]["title"], "할일 5");

    let req = test::TestRequest::get()
        .uri("/api/v1/todos?page=2&size=2&sort=title,asc")
        .to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["last"], true);
    assert_eq!(body["data"]["content"][0]["title"], "할일 5");
}

#[actix_web::test]
async fn test_writer_status_and_counts() {
    let app = test::init_service(create_app(common::state())).await;

    for (title, writer, complete) in [("a", "kim", true), ("b", "kim", false), ("c", "lee", true)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/todos")
            .set_json(json!({ "title": title, "writer": writer, "complete": complete }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/v1/todos/writer/kim").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["totalElements"], 2);

    let req = test::TestRequest::get().uri("/api/v1/todos/status/true").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["totalElements"], 2);

    let req = test::TestRequest::get().uri("/api/v1/todos/count").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"], 3);

    let req = test::TestRequest::get().uri("/api/v1/todos/count/writer/lee").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"], 1);

    let req = test::TestRequest::get().uri("/api/v1/todos/count/status/false").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/todos/search?writer=kim&complete=true")
        .to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["totalElements"], 1);
    assert_eq!(body["data"]["content"][0]["title"], "a");

    let req = test::TestRequest::get().uri("/api/v1/todos/search/title?title=b").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["totalElements"], 1);

    let req = test::TestRequest::get().uri("/api/v1/todos/list").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let req = test::TestRequest::delete().uri("/api/v1/todos/writer/kim").to_request();
    let (status, _) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);

    let req = test::TestRequest::get().uri("/api/v1/todos/count").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"], 1);

    let req = test::TestRequest::delete().uri("/api/v1/todos/all").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["message"], "모든 할일이 성공적으로 삭제되었습니다.");

    let req = test::TestRequest::get().uri("/api/v1/todos/count").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"], 0);
}

#[actix_web::test]
async fn test_title_longer_than_limit_is_rejected() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/todos")
        .set_json(json!({ "title": "t".repeat(257), "writer": "user1" }))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;

    assert_error(status, &body, 400, "V001");
    assert_eq!(body["error"]["fieldErrors"][0]["message"], "제목은 256자 이하여야 합니다.");
}

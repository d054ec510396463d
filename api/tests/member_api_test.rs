//! HTTP tests for `/api/v1/members`

mod common;

use actix_web::test;
use mall_api::create_app;
use serde_json::json;

use common::{assert_error, member_body, read, MEMBER_EMAIL};

#[actix_web::test]
async fn test_register_and_get_member() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/members")
        .set_json(member_body(MEMBER_EMAIL, "사용자1"))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "회원이 성공적으로 등록되었습니다.");
    assert_eq!(body["data"]["email"], MEMBER_EMAIL);
    assert!(body["data"].get("password").is_none());
    assert_eq!(body["data"]["roles"], json!(["USER"]));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/members/{}", MEMBER_EMAIL))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["nickname"], "사용자1");
}

#[actix_web::test]
async fn test_duplicates_conflict() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/members")
        .set_json(member_body(MEMBER_EMAIL, "사용자1"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/members")
        .set_json(member_body(MEMBER_EMAIL, "다른닉네임"))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_error(status, &body, 409, "U004");

    let req = test::TestRequest::post()
        .uri("/api/v1/members")
        .set_json(member_body("user2@mall.com", "사용자1"))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_error(status, &body, 409, "M002");
}

#[actix_web::test]
async fn test_invalid_registration_reports_every_field() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/members")
        .set_json(json!({ "email": "not-an-email", "password": "short" }))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;

    assert_error(status, &body, 400, "V001");
    let fields: Vec<&str> = body["error"]["fieldErrors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "nickname", "password"]);
}

#[actix_web::test]
async fn test_change_password() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/members")
        .set_json(member_body(MEMBER_EMAIL, "사용자1"))
        .to_request();
    test::call_service(&app, req).await;
    let uri = format!("/api/v1/members/{}/password", MEMBER_EMAIL);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "currentPassword": "wrong-password", "newPassword": "newpassword1" }))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_error(status, &body, 400, "U005");

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "currentPassword": "password123", "newPassword": "newpassword1" }))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn test_role_grants() {
    let app = test::init_service(create_app(common::state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/members")
        .set_json(member_body(MEMBER_EMAIL, "사용자1"))
        .to_request();
    test::call_service(&app, req).await;
    let uri = format!("/api/v1/members/{}/roles/ADMIN", MEMBER_EMAIL);

    let req = test::TestRequest::post().uri(&uri).to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["roles"], json!(["ADMIN", "USER"]));

    let req = test::TestRequest::post().uri(&uri).to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_error(status, &body, 409, "M005");

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["roles"], json!(["USER"]));

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/members/{}/roles/OWNER", MEMBER_EMAIL))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_error(status, &body, 404, "M004");
}

#[actix_web::test]
async fn test_update_list_and_delete() {
    let app = test::init_service(create_app(common::state())).await;

    for (email, nickname) in [(MEMBER_EMAIL, "사용자1"), ("user2@mall.com", "사용자2")] {
        let req = test::TestRequest::post()
            .uri("/api/v1/members")
            .set_json(member_body(email, nickname))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/members/{}", MEMBER_EMAIL))
        .set_json(json!({ "nickname": "새닉네임" }))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["nickname"], "새닉네임");

    let req = test::TestRequest::get().uri("/api/v1/members/search?keyword=user2").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["totalElements"], 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/members/{}", MEMBER_EMAIL))
        .to_request();
    let (status, _) = read(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);

    let req = test::TestRequest::get().uri("/api/v1/members").to_request();
    let (_, body) = read(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["totalElements"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/members/{}", MEMBER_EMAIL))
        .to_request();
    let (status, body) = read(test::call_service(&app, req).await).await;
    assert_error(status, &body, 404, "M001");
}

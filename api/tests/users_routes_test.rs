//! Tests for the user management routes and their role requirements

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use ag_api::create_app;
use ag_core::domain::entities::user::Role;
use ag_core::repositories::UserRepository;
use ag_shared::config::Environment;

use common::{bearer, TestContext, PASSWORD};

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(create_app(
            $ctx.state.clone(),
            $ctx.guard.clone(),
            Environment::Development,
        ))
        .await
    };
}

#[actix_web::test]
async fn test_admin_can_list_and_delete_users() {
    let ctx = TestContext::new();
    let admin = ctx.seed_user("root@example.com", "root", Role::Admin).await;
    let victim = ctx.seed_user("bob@example.com", "bob", Role::User).await;
    let token = ctx.token_for(&admin);
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|user| user.get("password_hash").is_none()));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/users/{}", victim.id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert!(ctx.users.find_by_id(victim.id).await.unwrap().is_none());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{}", victim.id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_regular_user_is_forbidden_from_admin_routes() {
    let ctx = TestContext::new();
    let user = ctx.seed_user("alice@example.com", "alice", Role::User).await;
    let token = ctx.token_for(&user);
    let app = init_app!(ctx);

    for uri in ["/api/v1/users", "/api/v1/admin/users"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN,
            "{}",
            uri
        );
    }

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{}", user.id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // Reading a single profile only needs authentication
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}", user.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"].get("createdAt").is_some());
}

#[actix_web::test]
async fn test_create_user_then_login() {
    let ctx = TestContext::new();
    let creator = ctx.seed_user("alice@example.com", "alice", Role::User).await;
    let token = ctx.token_for(&creator);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(bearer(&token))
        .set_json(json!({
            "email": "erin@example.com",
            "username": "erin",
            "password": "s3cret!",
            "role": "editor"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["data"]["role"], "editor");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "erin@example.com", "password": "s3cret!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["role"], "editor");

    // Duplicate email
    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(bearer(&token))
        .set_json(json!({
            "email": "alice@example.com",
            "username": "alice2",
            "password": PASSWORD
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_create_user_validation() {
    let ctx = TestContext::new();
    let admin = ctx.seed_user("root@example.com", "root", Role::Admin).await;
    let token = ctx.token_for(&admin);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/users")
        .insert_header(bearer(&token))
        .set_json(json!({
            "email": "frank@example.com",
            "username": "frank",
            "password": "12345",
            "role": "superuser"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["details"].get("password").is_some());
    assert!(body["details"].get("role").is_some());
    assert_eq!(ctx.users.len().await, 1);
}

#[actix_web::test]
async fn test_me_and_my_id() {
    let ctx = TestContext::new();
    let user = ctx.seed_user("alice@example.com", "alice", Role::User).await;
    let token = ctx.token_for(&user);
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/users/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["userId"], user.id);
    assert_eq!(body["data"]["role"], "user");

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/users/my-id")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], json!({ "userId": user.id }));
}

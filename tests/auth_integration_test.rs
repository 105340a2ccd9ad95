mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp, ADMIN_USERNAME, STAFF_PASSWORD, STAFF_USERNAME};
use fake::{
    faker::{internet::en::Username, name::en::Name},
    Fake,
};
use serde_json::json;

#[tokio::test]
async fn signup_creates_employee_account() {
    let app = TestApp::new().await;
    let name: String = Name().fake();
    let username = format!("{}_{}", Username().fake::<String>(), 7);

    let response = app
        .request(
            Method::POST,
            "/api/v1/signup",
            Some(json!({"name": name, "username": username, "password": "s3cret-pass"})),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], name);
    assert_eq!(body["data"]["username"], username);
    assert_eq!(body["data"]["role"], "employee");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn signup_rejects_duplicates_and_blank_fields() {
    let app = TestApp::new().await;

    let duplicate = app
        .request(
            Method::POST,
            "/api/v1/signup",
            Some(json!({"name": "Other", "username": STAFF_USERNAME, "password": "x"})),
            None,
        )
        .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let blank = app
        .request(
            Method::POST,
            "/api/v1/signup",
            Some(json!({"name": "  ", "username": "someone", "password": "pw"})),
            None,
        )
        .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    let body = response_json(blank).await;
    assert_eq!(body["message"], "Validation failed");
    assert!(body["errors"][0].as_str().unwrap().starts_with("name"));
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/login",
            Some(json!({"username": STAFF_USERNAME, "password": STAFF_PASSWORD})),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert!(body["data"]["expires_in"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["user"]["username"], STAFF_USERNAME);

    let token = body["data"]["token"].as_str().unwrap().to_string();
    let me = app
        .request(Method::GET, "/api/v1/me", None, Some(&token))
        .await;
    assert_eq!(me.status(), StatusCode::OK);
    let me = response_json(me).await;
    assert_eq!(me["data"]["username"], STAFF_USERNAME);
    assert_eq!(me["data"]["role"], "employee");
}

#[tokio::test]
async fn login_failures_are_unauthorized() {
    let app = TestApp::new().await;

    let unknown = app
        .request(
            Method::POST,
            "/api/v1/login",
            Some(json!({"username": "ghost", "password": "whatever"})),
            None,
        )
        .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(unknown).await;
    assert!(body["message"].as_str().unwrap().contains("User not found"));

    let wrong = app
        .request(
            Method::POST,
            "/api/v1/login",
            Some(json!({"username": ADMIN_USERNAME, "password": "not-it"})),
            None,
        )
        .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = TestApp::new().await;

    let missing = app.request(Method::GET, "/api/v1/inventory", None, None).await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .request(Method::GET, "/api/v1/inventory", None, Some("not.a.jwt"))
        .await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let ok = app.as_staff(Method::GET, "/api/v1/inventory", None).await;
    assert_eq!(ok.status(), StatusCode::OK);
}

#[tokio::test]
async fn employees_cannot_reach_admin_routes_but_admins_pass_every_gate() {
    let app = TestApp::new().await;

    let forbidden = app.as_staff(Method::GET, "/api/v1/admin/employees", None).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let admin_staff_area = app.as_admin(Method::GET, "/api/v1/dashboard", None).await;
    assert_eq!(admin_staff_area.status(), StatusCode::OK);
}

#[tokio::test]
async fn public_endpoints_answer_without_login() {
    let app = TestApp::new().await;

    let root = app.request(Method::GET, "/", None, None).await;
    assert_eq!(root.status(), StatusCode::OK);
    assert_eq!(
        response_json(root).await["message"],
        "Service HP API is running"
    );

    let health = app.request(Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(response_json(health).await["data"]["database"]["status"], "up");

    let status = app.request(Method::GET, "/api/v1/status", None, None).await;
    assert_eq!(response_json(status).await["data"]["service"], "servis-hp-api");
}

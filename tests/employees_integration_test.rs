mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp, STAFF_USERNAME};
use serde_json::json;

#[tokio::test]
async fn hiring_a_user_removes_them_from_available_users() {
    let app = TestApp::new().await;

    let available = app
        .as_admin(Method::GET, "/api/v1/admin/employees/available-users", None)
        .await;
    assert_eq!(available.status(), StatusCode::OK);
    let available = response_json(available).await;
    let users = available["data"].as_array().unwrap();
    assert_eq!(users.len(), 1, "admin accounts are never listed");
    assert_eq!(users[0]["username"], STAFF_USERNAME);

    let created = app
        .as_admin(
            Method::POST,
            "/api/v1/admin/employees",
            Some(json!({
                "user_id": app.staff_user_id,
                "position": "teknisi",
                "phone": "0812 3456 7890",
            })),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = response_json(created).await;
    assert_eq!(created["data"]["name"], "Rina Teknisi");
    assert_eq!(created["data"]["position"], "technician");
    assert_eq!(created["data"]["status"], "active");
    assert_eq!(created["data"]["username"], STAFF_USERNAME);
    assert!(created["data"]["hire_date"].is_string());

    let available = app
        .as_admin(Method::GET, "/api/v1/admin/employees/available-users", None)
        .await;
    assert!(response_json(available).await["data"]
        .as_array()
        .unwrap()
        .is_empty());

    let again = app
        .as_admin(
            Method::POST,
            "/api/v1/admin/employees",
            Some(json!({"user_id": app.staff_user_id, "position": "cashier"})),
        )
        .await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_employee_checks_the_user() {
    let app = TestApp::new().await;

    let unknown = app
        .as_admin(
            Method::POST,
            "/api/v1/admin/employees",
            Some(json!({"user_id": 9999, "position": "cashier"})),
        )
        .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let zero = app
        .as_admin(
            Method::POST,
            "/api/v1/admin/employees",
            Some(json!({"user_id": 0, "position": "cashier"})),
        )
        .await;
    assert_eq!(zero.status(), StatusCode::BAD_REQUEST);

    let bad_position = app
        .as_admin(
            Method::POST,
            "/api/v1/admin/employees",
            Some(json!({"user_id": app.staff_user_id, "position": "manager"})),
        )
        .await;
    assert_eq!(bad_position.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_can_reset_the_linked_password() {
    let app = TestApp::new().await;

    let created = app
        .as_admin(
            Method::POST,
            "/api/v1/admin/employees",
            Some(json!({"user_id": app.staff_user_id, "position": "cashier"})),
        )
        .await;
    let employee_id = response_json(created).await["data"]["id"].as_i64().unwrap();

    let updated = app
        .as_admin(
            Method::PUT,
            &format!("/api/v1/admin/employees/{employee_id}"),
            Some(json!({
                "position": "technician",
                "address": "Jl. Merdeka 1",
                "status": "nonaktif",
                "password": "fresh-password",
            })),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = response_json(updated).await;
    assert_eq!(updated["data"]["position"], "technician");
    assert_eq!(updated["data"]["status"], "inactive");
    assert_eq!(updated["data"]["address"], "Jl. Merdeka 1");

    let login = app
        .request(
            Method::POST,
            "/api/v1/login",
            Some(json!({"username": STAFF_USERNAME, "password": "fresh-password"})),
            None,
        )
        .await;
    assert_eq!(login.status(), StatusCode::OK);

    let missing = app
        .as_admin(
            Method::PUT,
            "/api/v1/admin/employees/4242",
            Some(json!({"position": "cashier", "status": "active"})),
        )
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_an_employee_keeps_the_account() {
    let app = TestApp::new().await;

    let created = app
        .as_admin(
            Method::POST,
            "/api/v1/admin/employees",
            Some(json!({"user_id": app.staff_user_id, "position": "cashier"})),
        )
        .await;
    let employee_id = response_json(created).await["data"]["id"].as_i64().unwrap();

    let deleted = app
        .as_admin(
            Method::DELETE,
            &format!("/api/v1/admin/employees/{employee_id}"),
            None,
        )
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let list = app.as_admin(Method::GET, "/api/v1/admin/employees", None).await;
    assert!(response_json(list).await["data"].as_array().unwrap().is_empty());

    // the staff token still works
    let me = app.as_staff(Method::GET, "/api/v1/me", None).await;
    assert_eq!(me.status(), StatusCode::OK);

    let again = app
        .as_admin(
            Method::DELETE,
            &format!("/api/v1/admin/employees/{employee_id}"),
            None,
        )
        .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

mod common;

use axum::http::{Method, StatusCode};
use common::{amount, response_json, TestApp};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn screen_job(item_id: i64) -> Value {
    json!({
        "customer_name": "Budi Santoso",
        "contact_number": "0812 3456 7890",
        "device_type": "Samsung A10",
        "complaint": "Layar pecah",
        "service_fee": "50000",
        "line_items": [
            {
                "inventory_item_id": item_id,
                "description": "LCD Samsung A10",
                "quantity": 1,
                "unit_price": "250000",
            },
            {
                "description": "Lem & pelindung layar",
                "quantity": 2,
                "unit_price": "15000",
            },
        ],
    })
}

#[tokio::test]
async fn create_computes_total_from_fee_and_lines() {
    let app = TestApp::new().await;
    let item_id = app.seed_item("LCD Samsung A10", 4, "250000", "180000").await;

    let body = app.seed_order(screen_job(item_id)).await;
    let order = &body["data"];

    assert_eq!(order["status"], "pending");
    assert!(order["completion_date"].is_null());
    assert_eq!(amount(&order["service_fee"]), dec!(50000));
    assert_eq!(amount(&order["subtotal"]), dec!(280000));
    assert_eq!(amount(&order["total"]), dec!(330000));

    let lines = order["line_items"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(amount(&lines[1]["line_cost"]), dec!(30000));
    assert_eq!(lines[0]["inventory_item_id"], item_id);
}

#[tokio::test]
async fn create_rejects_unknown_inventory_and_bad_input() {
    let app = TestApp::new().await;

    let unknown = app
        .as_staff(Method::POST, "/api/v1/repair-orders", Some(screen_job(777)))
        .await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    let body = response_json(unknown).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Inventory item 777 does not exist"));

    let blank = app
        .as_staff(
            Method::POST,
            "/api/v1/repair-orders",
            Some(json!({
                "customer_name": "",
                "contact_number": "0812",
                "device_type": "Oppo",
                "service_fee": "0",
            })),
        )
        .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let negative_qty = app
        .as_staff(
            Method::POST,
            "/api/v1/repair-orders",
            Some(json!({
                "customer_name": "Sari",
                "contact_number": "0812",
                "device_type": "Oppo",
                "service_fee": "0",
                "line_items": [{"description": "x", "quantity": -1, "unit_price": "1"}],
            })),
        )
        .await;
    assert_eq!(negative_qty.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn amounts_that_do_not_fit_a_money_column_are_rejected() {
    let app = TestApp::new().await;
    let order_with = |fee: &str, quantity: i64, unit_price: &str| {
        json!({
            "customer_name": "Sari",
            "contact_number": "0812",
            "device_type": "Oppo",
            "service_fee": fee,
            "line_items": [{"description": "x", "quantity": quantity, "unit_price": unit_price}],
        })
    };

    let overflowing = app
        .as_staff(
            Method::POST,
            "/api/v1/repair-orders",
            Some(order_with("0", 2, "79228162514264337593543950335")),
        )
        .await;
    assert_eq!(overflowing.status(), StatusCode::BAD_REQUEST);
    let body = response_json(overflowing).await;
    assert!(body["errors"][0]
        .as_str()
        .unwrap()
        .starts_with("line_items[0].unit_price: Amount cannot exceed"));

    let sub_cent = app
        .as_staff(
            Method::POST,
            "/api/v1/repair-orders",
            Some(order_with("0.005", 1, "1")),
        )
        .await;
    assert_eq!(sub_cent.status(), StatusCode::BAD_REQUEST);
    let body = response_json(sub_cent).await;
    assert!(body["errors"][0]
        .as_str()
        .unwrap()
        .starts_with("service_fee: Amount cannot have more than 2 decimal places"));

    let huge_quantity = app
        .as_staff(
            Method::POST,
            "/api/v1/repair-orders",
            Some(order_with("0", 100_001, "1")),
        )
        .await;
    assert_eq!(huge_quantity.status(), StatusCode::BAD_REQUEST);

    // each field fits, the sum does not
    let total_too_large = app
        .as_staff(
            Method::POST,
            "/api/v1/repair-orders",
            Some(order_with("9999999999999.99", 1, "0.01")),
        )
        .await;
    assert_eq!(total_too_large.status(), StatusCode::BAD_REQUEST);
    let body = response_json(total_too_large).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Order total exceeds the maximum amount"));
}

#[tokio::test]
async fn line_item_pushing_the_total_over_the_limit_changes_nothing() {
    let app = TestApp::new().await;
    let order = app
        .seed_order(json!({
            "customer_name": "Budi",
            "contact_number": "0812",
            "device_type": "Vivo",
            "service_fee": "9999999999999.00",
        }))
        .await;
    let id = order["data"]["id"].as_i64().unwrap();

    let rejected = app
        .as_staff(
            Method::POST,
            &format!("/api/v1/repair-orders/{id}/line-items"),
            Some(json!({"description": "LCD", "quantity": 2, "unit_price": "0.50"})),
        )
        .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let current = app
        .as_staff(Method::GET, &format!("/api/v1/repair-orders/{id}"), None)
        .await;
    let current = response_json(current).await;
    assert_eq!(amount(&current["data"]["total"]), dec!(9999999999999.00));
    assert!(current["data"]["line_items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn status_workflow_sets_completion_and_unlocks_whatsapp() {
    let app = TestApp::new().await;
    let item_id = app.seed_item("LCD Samsung A10", 4, "250000", "180000").await;
    let id = app.seed_order(screen_job(item_id)).await["data"]["id"]
        .as_i64()
        .unwrap();

    let early = app
        .as_staff(Method::GET, &format!("/api/v1/repair-orders/{id}/whatsapp"), None)
        .await;
    assert_eq!(early.status(), StatusCode::BAD_REQUEST);

    let in_repair = app
        .as_staff(
            Method::PUT,
            &format!("/api/v1/repair-orders/{id}/status"),
            Some(json!({"status": "Dalam Perbaikan"})),
        )
        .await;
    assert_eq!(in_repair.status(), StatusCode::OK);
    let in_repair = response_json(in_repair).await;
    assert_eq!(in_repair["data"]["status"], "in_repair");
    assert!(in_repair["data"]["completion_date"].is_null());

    let done = app
        .as_staff(
            Method::PUT,
            &format!("/api/v1/repair-orders/{id}/status"),
            Some(json!({"status": "selesai"})),
        )
        .await;
    let done = response_json(done).await;
    assert_eq!(done["data"]["status"], "done");
    assert!(done["data"]["completion_date"].is_string());
    assert_eq!(done["data"]["line_items"].as_array().unwrap().len(), 2);

    let link = app
        .as_staff(Method::GET, &format!("/api/v1/repair-orders/{id}/whatsapp"), None)
        .await;
    assert_eq!(link.status(), StatusCode::OK);
    let link = response_json(link).await;
    assert_eq!(link["data"]["phone"], "6281234567890");
    assert!(link["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Total biaya: Rp 330.000"));
    assert!(link["data"]["url"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/6281234567890?text=Halo%20Budi%20Santoso"));
}

#[tokio::test]
async fn unknown_status_falls_back_to_pending() {
    let app = TestApp::new().await;
    let mut job = screen_job(0);
    job["line_items"] = json!([]);
    job["status"] = json!("rusak total");

    let order = app.seed_order(job).await;
    assert_eq!(order["data"]["status"], "pending");
    assert_eq!(amount(&order["data"]["total"]), dec!(50000));
}

#[tokio::test]
async fn full_update_replaces_lines() {
    let app = TestApp::new().await;
    let item_id = app.seed_item("LCD Samsung A10", 4, "250000", "180000").await;
    let created = app.seed_order(screen_job(item_id)).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let intake = created["data"]["intake_date"].as_str().unwrap()[..19].to_string();

    let updated = app
        .as_staff(
            Method::PUT,
            &format!("/api/v1/repair-orders/{id}"),
            Some(json!({
                "customer_name": "Budi Santoso",
                "contact_number": "081234567890",
                "device_type": "Samsung A10s",
                "complaint": "Layar pecah, baterai kembung",
                "status": "ready for pickup",
                "service_fee": "75000",
                "line_items": [
                    {"description": "Baterai", "quantity": 1, "unit_price": "120000"},
                ],
            })),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = response_json(updated).await;
    let order = &updated["data"];
    assert_eq!(order["status"], "ready_for_pickup");
    assert_eq!(order["device_type"], "Samsung A10s");
    assert!(order["intake_date"].as_str().unwrap().starts_with(&intake));
    assert_eq!(order["line_items"].as_array().unwrap().len(), 1);
    assert_eq!(amount(&order["total"]), dec!(195000));

    let missing = app
        .as_staff(
            Method::PUT,
            "/api/v1/repair-orders/9999",
            Some(screen_job(item_id)),
        )
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn line_item_mutations_keep_the_total_in_sync() {
    let app = TestApp::new().await;
    let mut job = screen_job(0);
    job["line_items"] = json!([]);
    let id = app.seed_order(job).await["data"]["id"].as_i64().unwrap();

    let added = app
        .as_staff(
            Method::POST,
            &format!("/api/v1/repair-orders/{id}/line-items"),
            Some(json!({"description": "Konektor", "quantity": 2, "unit_price": "40000"})),
        )
        .await;
    assert_eq!(added.status(), StatusCode::CREATED);
    let added = response_json(added).await;
    assert_eq!(amount(&added["data"]["total"]), dec!(130000));
    let line_id = added["data"]["line_items"][0]["id"].as_i64().unwrap();

    let changed = app
        .as_staff(
            Method::PUT,
            &format!("/api/v1/line-items/{line_id}"),
            Some(json!({"description": "Konektor", "quantity": 1, "unit_price": "45000"})),
        )
        .await;
    assert_eq!(changed.status(), StatusCode::OK);
    assert_eq!(
        amount(&response_json(changed).await["data"]["total"]),
        dec!(95000)
    );

    let removed = app
        .as_staff(Method::DELETE, &format!("/api/v1/line-items/{line_id}"), None)
        .await;
    assert_eq!(removed.status(), StatusCode::OK);
    let removed = response_json(removed).await;
    assert_eq!(amount(&removed["data"]["total"]), dec!(50000));
    assert!(removed["data"]["line_items"].as_array().unwrap().is_empty());

    let gone = app
        .as_staff(Method::DELETE, &format!("/api/v1/line-items/{line_id}"), None)
        .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let orphan = app
        .as_staff(
            Method::POST,
            "/api/v1/repair-orders/9999/line-items",
            Some(json!({"description": "x", "quantity": 1, "unit_price": "1"})),
        )
        .await;
    assert_eq!(orphan.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_paginated_and_filterable() {
    let app = TestApp::new().await;
    for (name, device) in [
        ("Ani", "iPhone 11"),
        ("Budi", "Samsung A10"),
        ("Citra", "Oppo A5"),
    ] {
        let mut job = screen_job(0);
        job["customer_name"] = json!(name);
        job["device_type"] = json!(device);
        job["line_items"] = json!([]);
        app.seed_order(job).await;
    }

    let page = app
        .as_staff(Method::GET, "/api/v1/repair-orders?page=1&limit=2", None)
        .await;
    assert_eq!(page.status(), StatusCode::OK);
    let page = response_json(page).await;
    assert_eq!(page["data"]["total"], 3);
    assert_eq!(page["data"]["total_pages"], 2);
    let items = page["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["customer_name"], "Citra");
    assert!(items[0].get("line_items").is_none());

    let search = app
        .as_staff(Method::GET, "/api/v1/repair-orders?search=samsung", None)
        .await;
    let search = response_json(search).await;
    assert_eq!(search["data"]["total"], 1);
    assert_eq!(search["data"]["items"][0]["customer_name"], "Budi");

    let by_status = app
        .as_staff(Method::GET, "/api/v1/repair-orders?status=done", None)
        .await;
    assert_eq!(response_json(by_status).await["data"]["total"], 0);
}

#[tokio::test]
async fn public_tracking_finds_orders_by_name_or_phone() {
    let app = TestApp::new().await;
    let item_id = app.seed_item("LCD Samsung A10", 4, "250000", "180000").await;
    app.seed_order(screen_job(item_id)).await;

    let by_name = app
        .request(Method::GET, "/api/v1/repair-orders/search?name=budi", None, None)
        .await;
    assert_eq!(by_name.status(), StatusCode::OK);
    let by_name = response_json(by_name).await;
    let found = by_name["data"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["line_items"].as_array().unwrap().len(), 2);

    let by_phone = app
        .request(Method::GET, "/api/v1/repair-orders/search?phone=3456", None, None)
        .await;
    assert_eq!(response_json(by_phone).await["data"].as_array().unwrap().len(), 1);

    let nothing = app
        .request(Method::GET, "/api/v1/repair-orders/search?name=zzz", None, None)
        .await;
    assert!(response_json(nothing).await["data"].as_array().unwrap().is_empty());

    let no_params = app
        .request(Method::GET, "/api/v1/repair-orders/search", None, None)
        .await;
    assert_eq!(no_params.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_order_and_lines() {
    let app = TestApp::new().await;
    let item_id = app.seed_item("LCD Samsung A10", 4, "250000", "180000").await;
    let created = app.seed_order(screen_job(item_id)).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let line_id = created["data"]["line_items"][0]["id"].as_i64().unwrap();

    let deleted = app
        .as_staff(Method::DELETE, &format!("/api/v1/repair-orders/{id}"), None)
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let fetch = app
        .as_staff(Method::GET, &format!("/api/v1/repair-orders/{id}"), None)
        .await;
    assert_eq!(fetch.status(), StatusCode::NOT_FOUND);

    let line = app
        .as_staff(
            Method::PUT,
            &format!("/api/v1/line-items/{line_id}"),
            Some(json!({"description": "x", "quantity": 1, "unit_price": "1"})),
        )
        .await;
    assert_eq!(line.status(), StatusCode::NOT_FOUND);

    let again = app
        .as_staff(Method::DELETE, &format!("/api/v1/repair-orders/{id}"), None)
        .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

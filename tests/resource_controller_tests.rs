//! End-to-end resource tests. They need a migrated MySQL database at
//! `DATABASE_URL` and are ignored by default.

mod common;

use axum::Router;
use axum::http::StatusCode;
use brewery_server_lib::api::server::app;
use brewery_server_lib::api::state::AppState;
use brewery_server_lib::data::models::schema;
use brewery_server_lib::data::models::user::NewUser;
use brewery_server_lib::data::repos::implementors::user_repo::UserRepo;
use brewery_server_lib::data::repos::traits::repository::Repository;
use common::{request, send, test_state};
use diesel_async::RunQueryDsl;
use serde_json::{Value, json};

async fn setup() -> (AppState, String) {
    let state = test_state();
    let mut conn = state
        .db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    diesel::delete(schema::stock_operation_items::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::stock_operations::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::product_stock_amounts::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::sale_items::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::sales::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::coupon_products::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::coupons::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::products_prices::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::product_images::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::product_sizes::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::products::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::sizes::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::packages::table).execute(&mut conn).await.unwrap();
    diesel::delete(schema::users::table).execute(&mut conn).await.unwrap();

    let token = add_user(&state, "admin@brewery.local", true, false).await;
    (state, token)
}

/// Stores a user and returns a token for it.
async fn add_user(state: &AppState, email: &str, administrator: bool, guest: bool) -> String {
    let user = UserRepo::new(state.db.clone())
        .add(NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "unused".to_string(),
            kind: "individual".to_string(),
            document: None,
            state_registration: None,
            administrator,
            guest,
        })
        .await
        .expect("Failed to add user");

    state.jwt.generate_token(&user).expect("Failed to generate token")
}

async fn call(
    router: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send(router.clone(), request(method, uri, Some(token), body)).await
}

async fn create(router: &Router, uri: &str, token: &str, body: Value) -> i64 {
    let (status, created) = call(router, "POST", uri, token, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "{} -> {}", uri, created);
    created["id"].as_i64().unwrap()
}

async fn stock_amount(router: &Router, token: &str) -> Value {
    let (status, amounts) = call(router, "GET", "/api/v1/stock-amounts", token, None).await;
    assert_eq!(status, StatusCode::OK);
    amounts[0]["amount"].clone()
}

/// Ids of one product/size pair with its customer.
struct Catalog {
    customer_id: i64,
    product_id: i64,
    size_id: i64,
}

/// A customer and one product/size pair. When `price` is given the pair is
/// priced from 2000-01-01 on; when `stock` is given an entry is recorded.
async fn catalog(
    router: &Router,
    token: &str,
    price: Option<&str>,
    stock: Option<i32>,
) -> Catalog {
    let customer_id = create(
        router,
        "/api/v1/users",
        token,
        json!({
            "name": "Bar do Zé",
            "email": "bar@brewery.local",
            "password": "secret1",
            "type": "company"
        }),
    )
    .await;
    let size_id = create(
        router,
        "/api/v1/sizes",
        token,
        json!({ "description": "Bottle", "capacity": "0.60" }),
    )
    .await;
    let product_id = create(
        router,
        "/api/v1/products",
        token,
        json!({ "name": "Lager", "active": true, "size_ids": [size_id] }),
    )
    .await;

    if let Some(price) = price {
        create(
            router,
            "/api/v1/prices",
            token,
            json!({
                "product_id": product_id,
                "size_id": size_id,
                "start_date": "2000-01-01",
                "price": price
            }),
        )
        .await;
    }

    if let Some(amount) = stock {
        create(
            router,
            "/api/v1/stock-operations",
            token,
            json!({
                "type": "entry",
                "items": [{ "product_id": product_id, "size_id": size_id, "amount": amount }]
            }),
        )
        .await;
    }

    Catalog {
        customer_id,
        product_id,
        size_id,
    }
}

fn sale_body(catalog: &Catalog, quantity: i32, coupon_id: Option<i64>) -> Value {
    json!({
        "customer_id": catalog.customer_id,
        "coupon_id": coupon_id,
        "payment_method": "cash",
        "items": [{
            "product_id": catalog.product_id,
            "size_id": catalog.size_id,
            "quantity": quantity
        }]
    })
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn package_store_echoes_fields_with_new_id() {
    let (state, token) = setup().await;
    let router = app(state);

    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/packages",
        &token,
        Some(json!({ "description": "Keg", "active": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["description"], json!("Keg"));
    assert_eq!(body["active"], json!(true));

    let (status, listed) = call(&router, "GET", "/api/v1/packages", &token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn page_far_past_the_end_is_empty() {
    let (state, token) = setup().await;
    let router = app(state);

    create(
        &router,
        "/api/v1/packages",
        &token,
        json!({ "description": "Keg", "active": true }),
    )
    .await;

    let (status, listed) = call(
        &router,
        "GET",
        "/api/v1/packages?page=9223372036854775807",
        &token,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn guest_reads_admin_resources() {
    let (state, token) = setup().await;
    let guest = add_user(&state, "guest@brewery.local", false, true).await;
    let router = app(state);

    create(
        &router,
        "/api/v1/packages",
        &token,
        json!({ "description": "Keg", "active": true }),
    )
    .await;

    let (status, listed) = call(&router, "GET", "/api/v1/packages", &guest, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["description"], json!("Keg"));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn update_of_unknown_package_is_not_found() {
    let (state, token) = setup().await;
    let router = app(state);

    let (status, body) = call(
        &router,
        "PUT",
        "/api/v1/packages/999999",
        &token,
        Some(json!({ "description": "Barrel", "active": false })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Package not found." }));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn stock_exit_cannot_overdraw() {
    let (state, token) = setup().await;
    let router = app(state);
    let pair = catalog(&router, &token, None, Some(5)).await;

    let overdraw = json!([{
        "product_id": pair.product_id,
        "size_id": pair.size_id,
        "amount": 6
    }]);
    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/stock-operations",
        &token,
        Some(json!({ "type": "exit", "items": overdraw })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Insufficient stock." }));
    assert_eq!(stock_amount(&router, &token).await, json!(5));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn cancel_and_restore_of_manual_operation() {
    let (state, token) = setup().await;
    let router = app(state);
    let pair = catalog(&router, &token, None, Some(3)).await;

    let entry = json!([{ "product_id": pair.product_id, "size_id": pair.size_id, "amount": 7 }]);
    let operation_id = create(
        &router,
        "/api/v1/stock-operations",
        &token,
        json!({ "type": "entry", "date": "2024-05-01", "items": entry }),
    )
    .await;
    assert_eq!(stock_amount(&router, &token).await, json!(10));

    let uri = format!("/api/v1/stock-operations/{}", operation_id);

    let (status, canceled) = call(
        &router,
        "PUT",
        &uri,
        &token,
        Some(json!({ "date": "2024-05-01", "canceled": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(canceled["canceled"], json!(true));
    assert_eq!(stock_amount(&router, &token).await, json!(3));

    // same flag again moves nothing
    let (status, _) = call(
        &router,
        "PUT",
        &uri,
        &token,
        Some(json!({ "date": "2024-05-02", "canceled": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stock_amount(&router, &token).await, json!(3));

    let (status, restored) = call(
        &router,
        "PUT",
        &uri,
        &token,
        Some(json!({ "date": "2024-05-02", "canceled": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["canceled"], json!(false));
    assert_eq!(stock_amount(&router, &token).await, json!(10));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn concurrent_cancels_reverse_once() {
    let (state, token) = setup().await;
    let router = app(state);
    let pair = catalog(&router, &token, None, Some(5)).await;

    let entry = json!([{ "product_id": pair.product_id, "size_id": pair.size_id, "amount": 5 }]);
    let operation_id = create(
        &router,
        "/api/v1/stock-operations",
        &token,
        json!({ "type": "entry", "date": "2024-05-01", "items": entry }),
    )
    .await;

    let uri = format!("/api/v1/stock-operations/{}", operation_id);
    let body = json!({ "date": "2024-05-01", "canceled": true });
    let (first, second) = tokio::join!(
        call(&router, "PUT", &uri, &token, Some(body.clone())),
        call(&router, "PUT", &uri, &token, Some(body.clone())),
    );

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);
    assert_eq!(stock_amount(&router, &token).await, json!(5));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn canceled_sale_restores_stock() {
    let (state, token) = setup().await;
    let router = app(state);
    let pair = catalog(&router, &token, Some("12.50"), Some(10)).await;

    let sale_id = create(&router, "/api/v1/sales", &token, sale_body(&pair, 4, None)).await;
    assert_eq!(stock_amount(&router, &token).await, json!(6));

    let uri = format!("/api/v1/sales/{}", sale_id);
    let (status, canceled) = call(
        &router,
        "PUT",
        &uri,
        &token,
        Some(json!({ "status": "canceled", "payment_method": "cash" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(canceled["status"], json!("canceled"));
    assert_eq!(stock_amount(&router, &token).await, json!(10));

    let (status, body) = call(
        &router,
        "PUT",
        &uri,
        &token,
        Some(json!({ "status": "paid", "payment_method": "cash" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid status transition." }));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn concurrent_sale_cancels_restore_once() {
    let (state, token) = setup().await;
    let router = app(state);
    let pair = catalog(&router, &token, Some("12.50"), Some(10)).await;

    let sale_id = create(&router, "/api/v1/sales", &token, sale_body(&pair, 4, None)).await;

    let uri = format!("/api/v1/sales/{}", sale_id);
    let body = json!({ "status": "canceled", "payment_method": "cash" });
    let (first, second) = tokio::join!(
        call(&router, "PUT", &uri, &token, Some(body.clone())),
        call(&router, "PUT", &uri, &token, Some(body.clone())),
    );

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);
    assert_eq!(stock_amount(&router, &token).await, json!(10));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn sale_operation_is_canceled_through_the_sale() {
    let (state, token) = setup().await;
    let router = app(state);
    let pair = catalog(&router, &token, Some("12.50"), Some(10)).await;

    let sale_id = create(&router, "/api/v1/sales", &token, sale_body(&pair, 2, None)).await;

    let (_, operations) = call(&router, "GET", "/api/v1/stock-operations", &token, None).await;
    let linked = operations
        .as_array()
        .unwrap()
        .iter()
        .find(|operation| operation["sale_id"] == json!(sale_id))
        .cloned()
        .expect("sale has no stock operation");

    let (status, body) = call(
        &router,
        "PUT",
        &format!("/api/v1/stock-operations/{}", linked["id"]),
        &token,
        Some(json!({ "date": linked["date"], "canceled": true })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Operation belongs to a sale." }));
    assert_eq!(stock_amount(&router, &token).await, json!(8));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn exhausted_coupon_is_not_valid() {
    let (state, token) = setup().await;
    let router = app(state);
    let pair = catalog(&router, &token, Some("10.00"), Some(10)).await;

    let coupon_id = create(
        &router,
        "/api/v1/coupons",
        &token,
        json!({
            "name": "ONCE",
            "type": "value",
            "value": "2.00",
            "start_date": "2000-01-01",
            "use_limit": 1
        }),
    )
    .await;

    let (status, first) = call(
        &router,
        "POST",
        "/api/v1/sales",
        &token,
        Some(sale_body(&pair, 1, Some(coupon_id))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["discount"], json!("2.00"));

    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/sales",
        &token,
        Some(sale_body(&pair, 1, Some(coupon_id))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Coupon is not valid." }));
    assert_eq!(stock_amount(&router, &token).await, json!(9));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn expired_coupon_is_not_valid() {
    let (state, token) = setup().await;
    let router = app(state);
    let pair = catalog(&router, &token, Some("10.00"), Some(10)).await;

    let coupon_id = create(
        &router,
        "/api/v1/coupons",
        &token,
        json!({
            "name": "MILLENNIUM",
            "type": "percentage",
            "value": "10",
            "start_date": "2000-01-01",
            "end_date": "2000-12-31"
        }),
    )
    .await;

    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/sales",
        &token,
        Some(sale_body(&pair, 1, Some(coupon_id))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Coupon is not valid." }));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn sale_without_price_is_rejected() {
    let (state, token) = setup().await;
    let router = app(state);
    let pair = catalog(&router, &token, None, Some(10)).await;

    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/sales",
        &token,
        Some(sale_body(&pair, 1, None)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Price not found for product." }));
    assert_eq!(stock_amount(&router, &token).await, json!(10));
}

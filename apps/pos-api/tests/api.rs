//! End-to-end HTTP tests: the assembled router against in-memory SQLite.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use pos_api::auth::hash_password;
use pos_api::config::ApiConfig;
use pos_api::create_router;
use tillpoint_core::{NewUser, UserRole};
use tillpoint_db::{Database, DbConfig};

/// Spins up a server over a fresh in-memory database seeded with one
/// admin and one cashier.
async fn test_server() -> TestServer {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    db.users()
        .insert(&NewUser {
            first_name: "Avery".to_string(),
            last_name: "Stone".to_string(),
            username: "admin".to_string(),
            password_hash: hash_password("admin123").unwrap(),
            role: UserRole::Admin,
        })
        .await
        .unwrap();
    db.users()
        .insert(&NewUser {
            first_name: "Sam".to_string(),
            last_name: "Till".to_string(),
            username: "cashier".to_string(),
            password_hash: hash_password("cashier123").unwrap(),
            role: UserRole::Cashier,
        })
        .await
        .unwrap();

    let config = ApiConfig {
        http_port: 0,
        database_path: ":memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_lifetime_secs: 3600,
    };

    TestServer::new(create_router(db, config)).unwrap()
}

async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let res = server
        .post("/auth/login")
        .json(&json!({ "username": username, "password": password }))
        .await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn create_customer(server: &TestServer, token: &str, phone: &str) -> i64 {
    let res = server
        .post("/customers")
        .authorization_bearer(token)
        .json(&json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "address": "12 Harbor Rd",
            "phone": phone
        }))
        .await;

    assert_eq!(res.status_code(), StatusCode::CREATED);
    res.json::<Value>()["data"]["id"].as_i64().unwrap()
}

async fn create_item(server: &TestServer, token: &str, name: &str, unit_price_cents: i64) -> i64 {
    let res = server
        .post("/items")
        .authorization_bearer(token)
        .json(&json!({
            "name": name,
            "unitPriceCents": unit_price_cents,
            "stock": 50
        }))
        .await;

    assert_eq!(res.status_code(), StatusCode::CREATED);
    res.json::<Value>()["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let server = test_server().await;

    let res = server.get("/health").await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], true);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let server = test_server().await;

    let res = server
        .post("/auth/login")
        .json(&json!({ "username": "cashier", "password": "wrong" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);

    let body: Value = res.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["errorCode"], "unauthorized");
    assert_eq!(body["message"], "Invalid username or password");

    // Unknown username gets the identical message.
    let res = server
        .post("/auth/login")
        .json(&json!({ "username": "nobody", "password": "whatever" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>()["message"], "Invalid username or password");
}

#[tokio::test]
async fn protected_routes_require_token() {
    let server = test_server().await;

    let res = server.get("/bills").await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);

    let res = server
        .get("/items")
        .authorization_bearer("not-a-real-token")
        .await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bill_creation_flow() {
    let server = test_server().await;
    let token = login(&server, "cashier", "cashier123").await;

    let customer_id = create_customer(&server, &token, "+14155550123").await;
    let espresso = create_item(&server, &token, "Espresso", 1000).await;
    let croissant = create_item(&server, &token, "Croissant", 2000).await;

    let res = server
        .post("/bills")
        .authorization_bearer(&token)
        .json(&json!({
            "customerId": customer_id,
            "items": [
                { "itemId": espresso, "quantity": 2 },
                { "itemId": croissant, "quantity": 3 }
            ]
        }))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);

    let body: Value = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Bill created successfully");

    let bill = &body["data"];
    assert_eq!(bill["totalCents"], 8000);
    assert_eq!(bill["customer"]["firstName"], "Jane");
    assert_eq!(bill["user"]["username"], "cashier");
    assert!(bill["user"].get("passwordHash").is_none());

    let lines = bill["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["subtotalCents"], 2000);
    assert_eq!(lines[1]["subtotalCents"], 6000);
    assert_eq!(lines[0]["itemName"], "Espresso");

    let bill_id = bill["id"].as_i64().unwrap();

    // Read the bill back: same total, same two lines.
    let res = server
        .get(&format!("/bills/{bill_id}"))
        .authorization_bearer(&token)
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let fetched: Value = res.json();
    assert_eq!(fetched["data"]["totalCents"], 8000);
    assert_eq!(fetched["data"]["lines"].as_array().unwrap().len(), 2);

    // Lines-only projection.
    let res = server
        .get(&format!("/bills/{bill_id}/items"))
        .authorization_bearer(&token)
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let items: Value = res.json();
    let subtotal_sum: i64 = items["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["subtotalCents"].as_i64().unwrap())
        .sum();
    assert_eq!(subtotal_sum, 8000);

    // A second bill lists before the first.
    let res = server
        .post("/bills")
        .authorization_bearer(&token)
        .json(&json!({
            "customerId": customer_id,
            "items": [{ "itemId": espresso, "quantity": 1 }]
        }))
        .await;
    let second_id = res.json::<Value>()["data"]["id"].as_i64().unwrap();

    let res = server.get("/bills").authorization_bearer(&token).await;
    let listed: Value = res.json();
    let listed = listed["data"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"].as_i64().unwrap(), second_id);
    assert_eq!(listed[1]["id"].as_i64().unwrap(), bill_id);
    // Header listings carry no lines.
    assert!(listed[0].get("lines").is_none());
}

#[tokio::test]
async fn bill_validation_failures() {
    let server = test_server().await;
    let token = login(&server, "cashier", "cashier123").await;

    let customer_id = create_customer(&server, &token, "+14155550124").await;
    let espresso = create_item(&server, &token, "Espresso", 1000).await;

    // Empty line list.
    let res = server
        .post("/bills")
        .authorization_bearer(&token)
        .json(&json!({ "customerId": customer_id, "items": [] }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["errorCode"], "validation_error");
    assert_eq!(body["message"], "Bill must contain at least one item");

    // Zero quantity.
    let res = server
        .post("/bills")
        .authorization_bearer(&token)
        .json(&json!({
            "customerId": customer_id,
            "items": [{ "itemId": espresso, "quantity": 0 }]
        }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>()["message"],
        format!("Quantity must be > 0 for item {espresso}")
    );

    // Unknown item.
    let res = server
        .post("/bills")
        .authorization_bearer(&token)
        .json(&json!({
            "customerId": customer_id,
            "items": [{ "itemId": 9999, "quantity": 1 }]
        }))
        .await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    let body: Value = res.json();
    assert_eq!(body["errorCode"], "not_found");
    assert_eq!(body["message"], "Item not found: 9999");

    // Nothing was persisted by any of the failures.
    let res = server.get("/bills").authorization_bearer(&token).await;
    assert!(res.json::<Value>()["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn user_management_is_admin_only() {
    let server = test_server().await;
    let cashier_token = login(&server, "cashier", "cashier123").await;
    let admin_token = login(&server, "admin", "admin123").await;

    let res = server
        .get("/users")
        .authorization_bearer(&cashier_token)
        .await;
    assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>()["errorCode"], "forbidden");

    let res = server
        .post("/users")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "firstName": "Noor",
            "lastName": "Vale",
            "username": "noor",
            "password": "secret7",
            "role": "CASHIER"
        }))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);

    let body: Value = res.json();
    assert_eq!(body["data"]["username"], "noor");
    assert!(body["data"].get("passwordHash").is_none());

    // The new user can log in.
    login(&server, "noor", "secret7").await;

    // Duplicate username is rejected up front.
    let res = server
        .post("/users")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "firstName": "Other",
            "lastName": "Person",
            "username": "noor",
            "password": "secret8",
            "role": "CASHIER"
        }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["message"], "username 'noor' already exists");
}

#[tokio::test]
async fn customer_phone_rules() {
    let server = test_server().await;
    let token = login(&server, "cashier", "cashier123").await;

    create_customer(&server, &token, "+14155550125").await;

    // Duplicate phone.
    let res = server
        .post("/customers")
        .authorization_bearer(&token)
        .json(&json!({
            "firstName": "Janet",
            "lastName": "Doe",
            "address": "",
            "phone": "+14155550125"
        }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>()["message"],
        "phone '+14155550125' already exists"
    );

    // Malformed phone.
    let res = server
        .post("/customers")
        .authorization_bearer(&token)
        .json(&json!({
            "firstName": "Jo",
            "lastName": "Doe",
            "address": "",
            "phone": "555-0125"
        }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["errorCode"], "validation_error");
}

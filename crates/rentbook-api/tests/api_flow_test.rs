//! End-to-end HTTP flows through the full router.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use rentbook_api::{build_router, AppState};
use rentbook_core::repositories::{BillRepository, TenantRepository, UserRepository};
use rentbook_infrastructure::MemoryStore;
use rentbook_shared::config::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let mut config = AppConfig::default();
    config.security.argon2_memory_kib = 1024;
    config.security.argon2_iterations = 1;

    let store = Arc::new(MemoryStore::new(config.billing.electricity_unit_rate));
    let users: Arc<dyn UserRepository> = store.clone();
    let tenants: Arc<dyn TenantRepository> = store.clone();
    let bills: Arc<dyn BillRepository> = store;

    build_router(AppState::new(config, users, tenants, bills).unwrap())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().split(';').next().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, set_cookie, json)
}

/// Register `username` and return the session cookie pair.
async fn signup(app: &Router, username: &str) -> String {
    let (status, cookie, _) = send(
        app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": username, "password": "pw123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    cookie.expect("register sets a session cookie")
}

fn bob() -> Value {
    json!({ "name": "Bob", "mobile": "919876543210", "rentAmount": 5000 })
}

#[tokio::test]
async fn test_alice_scenario() {
    let app = app();

    let (status, cookie, user) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "alice", "password": "pw123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user, json!({ "id": 1, "username": "alice" }));
    let cookie = cookie.unwrap();
    assert!(cookie.starts_with("rentbook_sid="));

    let (status, _, tenant) = send(&app, "POST", "/api/tenants", Some(&cookie), Some(bob())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        tenant,
        json!({
            "id": 1,
            "userId": 1,
            "name": "Bob",
            "mobile": "919876543210",
            "rentAmount": 5000,
            "active": true
        })
    );

    let (status, _, bill) = send(
        &app,
        "POST",
        "/api/tenants/1/bills",
        Some(&cookie),
        Some(json!({ "month": "2024-01", "electricityReading": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(bill["tenantId"], 1);
    assert_eq!(bill["month"], "2024-01");
    assert_eq!(bill["electricityReading"], 100);
    assert_eq!(bill["electricityAmount"], 100);
    assert_eq!(bill["rentPaid"], false);
    assert_eq!(bill["electricityPaid"], false);
    let bill_id = bill["id"].as_u64().unwrap();

    let (status, _, updated) = send(
        &app,
        "PATCH",
        &format!("/api/bills/{bill_id}"),
        Some(&cookie),
        Some(json!({ "rentPaid": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["rentPaid"], true);
    assert_eq!(updated["electricityPaid"], false);
    assert_eq!(updated["electricityAmount"], 100);

    let (status, _, bills) = send(&app, "GET", "/api/tenants/1/bills", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bills.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_other_user_gets_not_found() {
    let app = app();
    let alice = signup(&app, "alice").await;
    let carol = signup(&app, "carol").await;

    send(&app, "POST", "/api/tenants", Some(&alice), Some(bob())).await;

    let (status, _, body) = send(&app, "GET", "/api/tenants/1", Some(&carol), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
    assert!(body.get("name").is_none());

    let (status, _, missing) = send(&app, "GET", "/api/tenants/99", Some(&carol), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, body);

    let (status, _, _) = send(&app, "DELETE", "/api/tenants/1", Some(&carol), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, list) = send(&app, "GET", "/api/tenants", Some(&carol), None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = app();

    for (method, uri) in [
        ("GET", "/api/user"),
        ("GET", "/api/tenants"),
        ("GET", "/api/tenants/1"),
        ("GET", "/api/tenants/1/bills"),
        ("DELETE", "/api/bills/1"),
    ] {
        let (status, _, body) = send(&app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["error"], "Unauthorized");
    }

    let (status, _, _) =
        send(&app, "GET", "/api/user", Some("rentbook_sid=forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_and_logout() {
    let app = app();
    signup(&app, "alice").await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (_, _, unknown) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "nobody", "password": "wrong" })),
    )
    .await;
    assert_eq!(unknown, body);

    let (status, cookie, user) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "alice", "password": "pw123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
    let cookie = cookie.unwrap();

    let (status, _, me) = send(&app, "GET", "/api/user", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "alice");

    let (status, _, _) = send(&app, "POST", "/api/logout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&app, "GET", "/api/user", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Logging out without a session is still fine.
    let (status, _, _) = send(&app, "POST", "/api/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = app();
    let cookie = signup(&app, "alice").await;
    let token = cookie.trim_start_matches("rentbook_sid=");

    let request = Request::builder()
        .uri("/api/user")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_username_is_bad_request() {
    let app = app();
    signup(&app, "alice").await;

    let (status, cookie, body) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "alice", "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(cookie.is_none());
    assert_eq!(body["error"], "Conflict");

    // Usernames are case-sensitive.
    signup(&app, "Alice").await;
}

#[tokio::test]
async fn test_duplicate_month_is_bad_request() {
    let app = app();
    let cookie = signup(&app, "alice").await;
    send(&app, "POST", "/api/tenants", Some(&cookie), Some(bob())).await;

    let bill = json!({ "month": "2024-01" });
    let (status, _, _) =
        send(&app, "POST", "/api/tenants/1/bills", Some(&cookie), Some(bill.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) =
        send(&app, "POST", "/api/tenants/1/bills", Some(&cookie), Some(bill)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Conflict");

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/tenants/1/bills",
        Some(&cookie),
        Some(json!({ "month": "2024-02" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_validation_errors() {
    let app = app();
    let cookie = signup(&app, "alice").await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/tenants",
        Some(&cookie),
        Some(json!({ "name": "Bob", "mobile": "9876543210", "rentAmount": 5000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(body["field"], "mobile");

    send(&app, "POST", "/api/tenants", Some(&cookie), Some(bob())).await;
    let (status, _, body) = send(
        &app,
        "POST",
        "/api/tenants/1/bills",
        Some(&cookie),
        Some(json!({ "month": "January" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "month");

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/tenants",
        Some(&cookie),
        Some(json!({ "name": "Bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/tenants",
        Some(&cookie),
        Some(json!({ "name": "   ", "mobile": "919876543210", "rentAmount": 5000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "name");

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/tenants",
        Some(&cookie),
        Some(json!({ "name": "Bob", "mobile": "91٠١٢٣٤٥٦٧٨٩", "rentAmount": 5000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "mobile");

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/tenants/1/bills",
        Some(&cookie),
        Some(json!({ "month": "２０２４-０１" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "month");
}

#[tokio::test]
async fn test_unparseable_ids_look_like_missing_records() {
    let app = app();
    let cookie = signup(&app, "alice").await;

    let (_, _, missing_tenant) = send(&app, "GET", "/api/tenants/99", Some(&cookie), None).await;
    for uri in ["/api/tenants/abc", "/api/tenants/-1", "/api/tenants/0"] {
        let (status, _, body) = send(&app, "GET", uri, Some(&cookie), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, missing_tenant, "{uri}");
    }

    let (_, _, missing_bill) = send(&app, "GET", "/api/bills/99", Some(&cookie), None).await;
    let (status, _, body) = send(&app, "DELETE", "/api/bills/x1", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, missing_bill);
}

#[tokio::test]
async fn test_soft_delete_keeps_bills_reachable_for_owner() {
    let app = app();
    let alice = signup(&app, "alice").await;
    let carol = signup(&app, "carol").await;
    send(&app, "POST", "/api/tenants", Some(&alice), Some(bob())).await;
    let (_, _, bill) = send(
        &app,
        "POST",
        "/api/tenants/1/bills",
        Some(&alice),
        Some(json!({ "month": "2024-01" })),
    )
    .await;
    let bill_uri = format!("/api/bills/{}", bill["id"]);

    let (status, _, _) = send(&app, "DELETE", "/api/tenants/1", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, list) = send(&app, "GET", "/api/tenants", Some(&alice), None).await;
    assert_eq!(list, json!([]));

    let (status, _, _) = send(&app, "GET", &bill_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = send(&app, "GET", &bill_uri, Some(&carol), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, "DELETE", &bill_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = send(&app, "GET", &bill_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, _, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

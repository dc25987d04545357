//! Requests rejected by validation never reach the database, so these run
//! against a pool that cannot connect.

mod common;

use axum::http::StatusCode;
use common::{TestClient, error_code};
use serde_json::json;

fn transaction_body(amount_cents: serde_json::Value) -> serde_json::Value {
    json!({
        "accountId": "550e8400-e29b-41d4-a716-446655440000",
        "type": "EXPENSE",
        "amountCents": amount_cents,
        "occurredAt": "2025-01-15T12:30:00Z",
        "merchant": "Whole Foods"
    })
}

#[tokio::test]
async fn create_rejects_zero_amount() {
    let client = TestClient::offline();
    let (status, body) = client.post("/v1/transactions", transaction_body(json!(0))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "invalid_request");
    assert!(body["error"]["message"].as_str().unwrap().contains("amountCents"));
}

#[tokio::test]
async fn create_rejects_amount_beyond_int_range() {
    let client = TestClient::offline();
    let (status, body) = client
        .post("/v1/transactions", transaction_body(json!(2_147_483_648_i64)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("2147483647"));
}

#[tokio::test]
async fn create_rejects_negative_amount() {
    let client = TestClient::offline();
    let (status, _) = client.post("/v1/transactions", transaction_body(json!(-250))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_rejects_fractional_amount() {
    let client = TestClient::offline();
    let (status, body) = client.post("/v1/transactions", transaction_body(json!(12.5))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "invalid_request");
}

#[tokio::test]
async fn create_rejects_unknown_type() {
    let client = TestClient::offline();
    let mut body = transaction_body(json!(100));
    body["type"] = json!("REFUND");

    let (status, _) = client.post("/v1/transactions", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_rejects_unparseable_date() {
    let client = TestClient::offline();
    let mut body = transaction_body(json!(100));
    body["occurredAt"] = json!("yesterday-ish");

    let (status, body) = client.post("/v1/transactions", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("occurredAt"));
}

#[tokio::test]
async fn update_rejects_zero_amount() {
    let client = TestClient::offline();
    let (status, _) = client
        .patch(
            "/v1/transactions/550e8400-e29b-41d4-a716-446655440000",
            json!({ "amountCents": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_transaction_id_is_bad_request() {
    let client = TestClient::offline();
    let (status, body) = client.get("/v1/transactions/not-a-uuid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "invalid_request");
}

#[tokio::test]
async fn list_rejects_out_of_range_pagination() {
    let client = TestClient::offline();

    let (status, _) = client.get("/v1/transactions?limit=500").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client.get("/v1/transactions?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client.get("/v1/transactions?offset=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_rejects_bad_filters() {
    let client = TestClient::offline();

    let (status, _) = client.get("/v1/transactions?accountId=nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client.get("/v1/transactions?from=2025-13-45").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn monthly_endpoints_validate_year_and_month() {
    let client = TestClient::offline();

    for path in [
        "/v1/analytics/monthly-summary",
        "/v1/analytics/category-breakdown",
        "/v1/ai/monthly-report",
    ] {
        for query in ["year=2025&month=13", "year=2025&month=0", "year=1999&month=5", "year=2025", "year=2025&month=x"] {
            let (status, body) = client.get(&format!("{path}?{query}")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path}?{query}");
            assert_eq!(error_code(&body), "invalid_request", "{path}?{query}");
        }
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let client = TestClient::offline();
    let (status, _) = client.get("/v1/budgets").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

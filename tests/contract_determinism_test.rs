//! Contract and determinism tests for the settlement endpoints.
//!
//! - Contract: camelCase field names and which fields are present
//! - Determinism: the same request twice yields identical bytes

use axum::http::StatusCode;
use pokerledger::api::{self, AppState};
use pokerledger::config::{Config, ReconciliationMode};
use pokerledger::{PaymentHandle, PlayerId};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use url::Url;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn setup_test_app() -> axum::Router {
    let config = Config {
        port: 0,
        payment_base_url: Url::parse("https://venmo.com").unwrap(),
        payment_note: "TL Online".to_string(),
        reconciliation_mode: ReconciliationMode::Lenient,
        payment_handles: vec![(PlayerId::from("a"), PaymentHandle::parse("alice").unwrap())],
    };
    api::create_router(AppState::from_config(config).expect("state init failed"))
}

async fn post_raw(app: axum::Router, uri: &str, body: &Value) -> (StatusCode, Vec<u8>) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn keys(value: &Value) -> Vec<&str> {
    let mut keys: Vec<&str> = value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    keys
}

fn settlements_body() -> Value {
    json!({
        "balances": [
            {"id": "a", "name": "Alice", "net": 1000},
            {"id": "b", "name": "Bob", "net": -400},
            {"id": "c", "name": "Carol", "net": -300},
            {"id": "d", "name": "Dave", "net": -300},
        ]
    })
}

fn session_body() -> Value {
    json!({
        "gameUrl": "https://pokernow.club/games/pglContract",
        "entries": [
            {"playerId": "a", "playerName": "Alice", "buyIn": 1000, "buyOut": 2500},
            {"playerId": "b", "playerName": "Bob", "buyIn": 1500, "stack": 0},
            {"playerId": "c", "playerName": "Carol", "buyIn": 500, "stack": 500},
        ]
    })
}

// =============================================================================
// Contract
// =============================================================================

#[tokio::test]
async fn test_settlements_contract() {
    let (status, bytes) = post_raw(setup_test_app(), "/v1/settlements", &settlements_body()).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(keys(&body), vec!["reconciliation", "settlements", "unsettled"]);
    assert_eq!(
        keys(&body["settlements"][0]),
        vec!["amount", "from", "settlementKey", "to"]
    );
    assert_eq!(keys(&body["settlements"][0]["from"]), vec!["id", "name"]);
    assert_eq!(
        keys(&body["reconciliation"]),
        vec![
            "imbalance",
            "settled",
            "totalCredit",
            "totalDebit",
            "unsettledCredit",
            "unsettledDebit"
        ]
    );
    assert!(body["settlements"][0]["amount"].is_i64());
}

#[tokio::test]
async fn test_session_ledger_contract() {
    let (status, bytes) = post_raw(setup_test_app(), "/v1/sessions/ledger", &session_body()).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    // No session window was supplied, so startedAt/endedAt are omitted or null.
    for field in [
        "buyInTotal",
        "cashOutTotal",
        "gameId",
        "reconciliation",
        "results",
        "settlements",
        "skippedEntries",
        "unsettled",
    ] {
        assert!(body.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(
        keys(&body["results"][0]),
        vec!["buyIn", "cashOut", "id", "name", "net"]
    );
    assert!(body.get("appearance").is_none());
}

#[tokio::test]
async fn test_payment_links_contract() {
    let body = json!({
        "playerId": "b",
        "settlements": [{
            "from": {"id": "b", "name": "Bob"},
            "to": {"id": "a", "name": "Alice"},
            "amount": 1500
        }]
    });
    let (status, bytes) = post_raw(setup_test_app(), "/v1/payment-links", &body).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        keys(&body[0]),
        vec![
            "amount",
            "counterparty",
            "counterpartyHandle",
            "direction",
            "link",
            "settlementKey"
        ]
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[tokio::test]
async fn test_settlements_deterministic_bytes() {
    let (_, first) = post_raw(setup_test_app(), "/v1/settlements", &settlements_body()).await;
    let (_, second) = post_raw(setup_test_app(), "/v1/settlements", &settlements_body()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_session_ledger_deterministic_bytes() {
    let app = setup_test_app();
    let (_, first) = post_raw(app.clone(), "/v1/sessions/ledger", &session_body()).await;
    let (_, second) = post_raw(app, "/v1/sessions/ledger", &session_body()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_settlement_keys_are_stable_and_distinct() {
    let (_, bytes) = post_raw(setup_test_app(), "/v1/settlements", &settlements_body()).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let keys: Vec<&str> = body["settlements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["settlementKey"].as_str().unwrap())
        .collect();

    assert_eq!(keys.len(), 3);
    assert!(keys.iter().all(|k| k.len() == "stl:".len() + 24));
    let mut unique = keys.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), keys.len());
}

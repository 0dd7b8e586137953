use axum::http::StatusCode;
use pokerledger::api::{self, AppState};
use pokerledger::config::{Config, ReconciliationMode};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use url::Url;

fn setup_test_app(reconciliation_mode: ReconciliationMode) -> axum::Router {
    let config = Config {
        port: 0,
        payment_base_url: Url::parse("https://venmo.com").unwrap(),
        payment_note: "TL Online".to_string(),
        reconciliation_mode,
        payment_handles: vec![],
    };
    api::create_router(AppState::from_config(config).expect("state init failed"))
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
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
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn entry(id: &str, name: &str, buy_in: i64, buy_out: i64, stack: i64) -> Value {
    json!({
        "playerId": id,
        "playerName": name,
        "buyIn": buy_in,
        "buyOut": buy_out,
        "stack": stack,
    })
}

fn session_body() -> Value {
    json!({
        "gameUrl": "https://www.pokernow.club/games/pglTest01",
        "entries": [
            {
                "playerId": "p1", "playerName": " Alice ", "buyIn": 2000, "buyOut": 0, "stack": 3500,
                "sessionStartAt": "2026-03-01T19:05:00Z", "sessionEndAt": "2026-03-01T23:40:00Z"
            },
            {
                "playerId": "p2", "playerName": "Bob", "buyIn": 2000, "buyOut": 500, "stack": 0,
                "sessionStartAt": "2026-03-01T19:00:00Z", "sessionEndAt": "2026-03-01T21:00:00Z"
            },
            entry("p3", "Carol", 1000, 1000, 0),
            entry("p4", "Dave", 1000, 2000, 0),
            entry("p2", "Bob again", 1000, 0, 0),
            entry("", "Observer", 0, 0, 0),
        ]
    })
}

#[tokio::test]
async fn test_session_ledger_aggregates_and_settles() {
    let app = setup_test_app(ReconciliationMode::Strict);
    let (status, body) = post_json(app, "/v1/sessions/ledger", session_body()).await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["gameId"], "pglTest01");
    assert_eq!(body["buyInTotal"], 7000);
    assert_eq!(body["cashOutTotal"], 7000);
    assert_eq!(body["skippedEntries"], 1);
    assert_eq!(body["startedAt"], "2026-03-01T19:00:00Z");
    assert_eq!(body["endedAt"], "2026-03-01T23:40:00Z");

    let results = body["results"].as_array().unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["p1", "p4", "p3", "p2"]);
    assert_eq!(results[0]["name"], "Alice");
    assert_eq!(results[0]["cashOut"], 3500);
    assert_eq!(results[0]["net"], 1500);
    assert_eq!(results[3]["name"], "Bob");
    assert_eq!(results[3]["buyIn"], 3000);
    assert_eq!(results[3]["net"], -2500);

    let settlements = body["settlements"].as_array().unwrap();
    assert_eq!(settlements.len(), 2);
    assert_eq!(settlements[0]["from"]["id"], "p2");
    assert_eq!(settlements[0]["to"]["id"], "p1");
    assert_eq!(settlements[0]["amount"], 1500);
    assert_eq!(settlements[1]["from"]["id"], "p2");
    assert_eq!(settlements[1]["to"]["id"], "p4");
    assert_eq!(settlements[1]["amount"], 1000);
    assert_eq!(body["reconciliation"]["settled"], 2500);
}

#[tokio::test]
async fn test_session_ledger_game_id_from_filename() {
    let app = setup_test_app(ReconciliationMode::Lenient);
    let body = json!({
        "ledgerFilename": "ledger_pglFile9 (1).csv",
        "entries": [entry("p1", "A", 500, 1000, 0), entry("p2", "B", 500, 0, 0)]
    });
    let (status, body) = post_json(app, "/v1/sessions/ledger", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gameId"], "pglFile9");
    assert_eq!(body["settlements"][0]["amount"], 500);
}

#[tokio::test]
async fn test_session_ledger_invalid_game_url() {
    let app = setup_test_app(ReconciliationMode::Lenient);
    let body = json!({
        "gameUrl": "https://example.com/games/nope",
        "entries": []
    });
    let (status, body) = post_json(app, "/v1/sessions/ledger", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Poker Now"));
}

#[tokio::test]
async fn test_session_ledger_unbalanced() {
    let entries = json!({
        "entries": [entry("p1", "A", 1000, 1600, 0), entry("p2", "B", 1000, 0, 0)]
    });

    let app = setup_test_app(ReconciliationMode::Lenient);
    let (status, body) = post_json(app, "/v1/sessions/ledger", entries.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("gameId").is_none());
    assert_eq!(body["reconciliation"]["imbalance"], -400);
    assert_eq!(body["settlements"][0]["amount"], 600);
    assert_eq!(body["unsettled"][0]["id"], "p2");
    assert_eq!(body["unsettled"][0]["net"], -400);

    let app = setup_test_app(ReconciliationMode::Strict);
    let (status, _) = post_json(app, "/v1/sessions/ledger", entries).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

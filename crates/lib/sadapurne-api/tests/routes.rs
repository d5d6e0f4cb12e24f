use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sadapurne_api::router;
use sadapurne_core::control::LookupService;
use sadapurne_core::store::{MemoryProducerStore, ProducerSource, StoreError, StoreResult};
use sadapurne_store::{Filter, ProducerRecord};
use serde_json::{Value, json};
use tower::ServiceExt;

const BODY_LIMIT: usize = 64 * 1024;

/// Source that counts queries and answers them from memory.
struct CountingSource {
    calls: Arc<AtomicUsize>,
    inner: MemoryProducerStore,
}

impl ProducerSource for CountingSource {
    async fn query(&self, table: &str, filter: &Filter) -> StoreResult<Vec<ProducerRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.query(table, filter).await
    }
}

struct FailingSource;

impl ProducerSource for FailingSource {
    async fn query(&self, _table: &str, _filter: &Filter) -> StoreResult<Vec<ProducerRecord>> {
        Err(StoreError::remote(500, "stub exploded"))
    }
}

fn fixture() -> MemoryProducerStore {
    let rows = json!([
        {"aadhar": "1234-5678-9012", "name": "Ravi Kumar", "fssai_license_number": "10012345000123", "pin": 560_001},
        {"aadhar": "2222-3333-4444", "name": "Meena Shah", "fssai_license_number": "10098765000456", "pin": 560_002},
        {"aadhar": "5555-6666-7777", "name": "Anita Ravi", "fssai_license_number": "10055555000789", "pin": 560_003}
    ]);
    MemoryProducerStore::from_json(&rows.to_string()).expect("fixture should parse")
}

fn counting_app(store: MemoryProducerStore) -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        calls: calls.clone(),
        inner: store,
    };
    (router(LookupService::new(source), BODY_LIMIT), calls)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |body| Body::from(body.to_string())))
        .expect("request should build");
    let response = app.oneshot(request).await.expect("router should respond");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let value = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, value)
}

#[tokio::test]
async fn home_lists_the_endpoints() {
    let (app, _) = counting_app(fixture());

    let (status, body) = send(app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Sadapurne MCP Server API"));
    assert_eq!(
        body["endpoints"]["get_all_verified_producers"],
        json!("GET /api/producers")
    );
    assert!(body["endpoints"].get("get_producer_by_pin").is_none());
}

#[tokio::test]
async fn health_reports_healthy_without_querying() {
    let (app, calls) = counting_app(fixture());

    let (status, body) = send(app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "message": "MCP Server API is running"}));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn aadhar_route_returns_the_record() {
    let (app, calls) = counting_app(fixture());

    let (status, body) = send(
        app,
        "POST",
        "/api/producer/aadhar",
        Some(r#"{"aadhar": "1234-5678-9012"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("success"));
    assert_eq!(body["data"]["name"], json!("Ravi Kumar"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn name_route_returns_every_match() {
    let (app, _) = counting_app(fixture());

    let (status, body) = send(app, "POST", "/api/producer/name", Some(r#"{"name": "ravi"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<Value> = body["data"]
        .as_array()
        .expect("data should be a list")
        .iter()
        .map(|row| row["name"].clone())
        .collect();
    assert_eq!(names, [json!("Ravi Kumar"), json!("Anita Ravi")]);
}

#[tokio::test]
async fn producers_route_returns_everything() {
    let (app, _) = counting_app(fixture());

    let (status, body) = send(app, "GET", "/api/producers", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn fssai_route_returns_the_record() {
    let (app, _) = counting_app(fixture());

    let (status, body) = send(
        app,
        "POST",
        "/api/producer/fssai",
        Some(r#"{"fssai_number": "10098765000456"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["aadhar"], json!("2222-3333-4444"));
}

#[tokio::test]
async fn no_match_is_404_with_the_not_found_sentence() {
    let cases = [
        ("POST", "/api/producer/aadhar", Some(r#"{"aadhar": "0000"}"#), "No verified producer found with this Aadhaar number"),
        ("POST", "/api/producer/name", Some(r#"{"name": "zzz"}"#), "No verified producers found with this name"),
        ("POST", "/api/producer/fssai", Some(r#"{"fssai_number": "0"}"#), "No verified producer found with this FSSAI number"),
    ];
    for (method, uri, body, sentence) in cases {
        let (app, _) = counting_app(fixture());
        let (status, response) = send(app, method, uri, body).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(response, json!({"status": "not_found", "message": sentence}));
    }

    let (app, _) = counting_app(MemoryProducerStore::new(Vec::new()));
    let (status, response) = send(app, "GET", "/api/producers", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        response,
        json!({"status": "not_found", "message": "No verified producers found"})
    );
}

#[tokio::test]
async fn missing_field_is_400_and_never_queries() {
    let cases = [
        ("/api/producer/aadhar", "aadhar"),
        ("/api/producer/name", "name"),
        ("/api/producer/fssai", "fssai_number"),
    ];
    let bodies = [None, Some(""), Some("{}"), Some("[]"), Some("not json"), Some(r#"{"other": 1}"#)];

    for (uri, field) in cases {
        for body in bodies {
            let (app, calls) = counting_app(fixture());
            let (status, response) = send(app, "POST", uri, body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} with {body:?}");
            assert_eq!(
                response,
                json!({
                    "status": "invalid_request",
                    "error": format!("Missing '{field}' in request body")
                })
            );
            assert_eq!(calls.load(Ordering::SeqCst), 0, "{uri} must not query");
        }
    }
}

#[tokio::test]
async fn mistyped_field_is_400() {
    let (app, calls) = counting_app(fixture());

    let (status, response) = send(app, "POST", "/api/producer/aadhar", Some(r#"{"aadhar": 42}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        response["error"]
            .as_str()
            .is_some_and(|error| error.starts_with("Invalid 'aadhar' in request body"))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn query_failure_is_500_on_every_data_route() {
    let cases = [
        ("POST", "/api/producer/aadhar", Some(r#"{"aadhar": "1234"}"#)),
        ("POST", "/api/producer/name", Some(r#"{"name": "ravi"}"#)),
        ("GET", "/api/producers", None),
        ("POST", "/api/producer/fssai", Some(r#"{"fssai_number": "1001"}"#)),
    ];

    for (method, uri, body) in cases {
        let app = router(LookupService::new(FailingSource), BODY_LIMIT);
        let (status, response) = send(app, method, uri, body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(response, json!({"status": "error", "message": "Error: stub exploded"}));
    }
}

#[tokio::test]
async fn there_is_no_pin_route() {
    let (app, calls) = counting_app(fixture());

    let request = Request::builder()
        .method("POST")
        .uri("/api/producer/pin")
        .body(Body::from(r#"{"pin": 560001}"#))
        .expect("request should build");
    let response = app.oneshot(request).await.expect("router should respond");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_body_is_a_json_rejection() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        calls: calls.clone(),
        inner: fixture(),
    };
    let app = router(LookupService::new(source), 64);
    let body = format!(r#"{{"aadhar": "{}"}}"#, "1".repeat(200));

    let (status, response) = send(app, "POST", "/api/producer/aadhar", Some(&body)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response["status"], json!("invalid_request"));
    assert!(response["error"].as_str().is_some_and(|error| !error.is_empty()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn whitespace_name_is_searched() {
    let (app, calls) = counting_app(fixture());

    let (status, body) = send(app, "POST", "/api/producer/name", Some(r#"{"name": " "}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_string_field_is_missing() {
    let (app, calls) = counting_app(fixture());

    let (status, body) = send(app, "POST", "/api/producer/fssai", Some(r#"{"fssai_number": ""}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing 'fssai_number' in request body"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use clarityai::api::{build_router, AppState};
use clarityai::config::{AppConfig, ExplorerConfig, ProviderConfig};
use clarityai::explorer::mock::MockExplorer;
use clarityai::explorer::{BlockchainExplorer, HiroExplorer};
use clarityai::llm::mock::MockProvider;
use clarityai::llm::{DeepSeekProvider, LlmGateway};
use clarityai::pipeline::Orchestrator;
use clarityai::prompts::PromptBuilder;

const MALICIOUS: &str = "(define-public (run)
  (begin
    (contract-call? 'SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE.dex swap-1 u10)
    (contract-call? 'SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE.dex swap-2 u10)
    (contract-call? 'SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE.dex swap-3 u10)
    (contract-call? 'SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE.dex swap-4 u10)
    (contract-call? 'SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE.dex swap-5 u10)
    (contract-call? 'SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE.dex swap-6 u10)))";

fn create_test_state(provider: Arc<MockProvider>) -> AppState {
    create_state_with(provider, MockExplorer::new(), AppConfig::default())
}

fn create_state_with(provider: Arc<MockProvider>, explorer: MockExplorer, config: AppConfig) -> AppState {
    let orchestrator = Orchestrator::new(
        LlmGateway::new(provider),
        PromptBuilder::new(),
        Arc::new(explorer),
        config.explorer.events_limit,
    );
    AppState::new(orchestrator, config)
}

fn app(state: &AppState) -> Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_state(Arc::new(MockProvider::replying("")));
    let req = make_request("GET", "/api/health", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "clarityai");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_chat_against_provider_wire_format() {
    let upstream = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            axum::Json(json!({
                "choices": [{ "message": { "content": "Stacks is a Bitcoin layer." } }]
            }))
        }),
    );
    let base = spawn_upstream(upstream).await;

    let provider_config = ProviderConfig {
        api_key: "test-key".into(),
        api_url: format!("{}/v1/chat/completions", base),
        ..ProviderConfig::default()
    };
    let orchestrator = Orchestrator::new(
        LlmGateway::new(Arc::new(DeepSeekProvider::new(&provider_config))),
        PromptBuilder::new(),
        Arc::new(MockExplorer::new()),
        10,
    );
    let state = AppState::new(orchestrator, AppConfig::default());

    let req = make_request("POST", "/api/ai/chat", Some(json!({ "message": "What is Stacks?" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "message": "Stacks is a Bitcoin layer." }));
}

#[tokio::test]
async fn test_analyze_empty_code_is_rejected_without_gateway_call() {
    let provider = Arc::new(MockProvider::replying("{}"));
    let state = create_test_state(provider.clone());

    let req = make_request("POST", "/api/ai/analyze", Some(json!({ "code": "" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].is_string());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_missing_fields_are_400() {
    let provider = Arc::new(MockProvider::replying("{}"));
    let state = create_test_state(provider.clone());

    for uri in [
        "/api/ai/chat",
        "/api/ai/generate",
        "/api/ai/generate-tests",
        "/api/ai/summarize",
        "/api/ai/analyze-transaction",
        "/api/ai/analyze-contract",
        "/api/ai/decode",
    ] {
        let req = make_request("POST", uri, Some(json!({})));
        let response = app(&state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert!(response_json(response).await["error"].is_string(), "{}", uri);
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_bodies_are_400_with_json_error() {
    let provider = Arc::new(MockProvider::replying("{}"));
    let state = create_test_state(provider.clone());

    for (uri, body) in [
        ("/api/ai/chat", json!({ "message": 5 })),
        ("/api/ai/analyze", json!({ "code": ["x"] })),
        ("/api/ai/generate", json!({ "description": "token", "features": "mint" })),
        ("/api/ai/decode", json!({ "input": true })),
    ] {
        let req = make_request("POST", uri, Some(body));
        let response = app(&state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert!(response_json(response).await["error"].is_string(), "{}", uri);
    }

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/ai/chat")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response_json(response).await["error"].is_string());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_no_json_fatal_for_summary_and_tests() {
    let state = create_test_state(Arc::new(MockProvider::replying("Sorry, I can only answer in prose.")));

    for uri in ["/api/ai/summarize", "/api/ai/generate-tests"] {
        let req = make_request("POST", uri, Some(json!({ "code": "(ok true)" })));
        let response = app(&state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert!(response_json(response).await["error"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_no_json_degrades_for_analysis_routes() {
    let state = create_test_state(Arc::new(MockProvider::replying("Sorry, I can only answer in prose.")));

    let req = make_request("POST", "/api/ai/analyze", Some(json!({ "code": "(ok true)" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["overallRisk"], "medium");
    assert_eq!(body["issues"][0]["description"], "Unable to perform complete security analysis");

    let req = make_request(
        "POST",
        "/api/ai/analyze-contract",
        Some(json!({ "source": "(define-read-only (get-count) (ok u0))" })),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["summary"], "Analysis completed with limited information");
    assert_eq!(body["securityScore"], "50");
    assert_eq!(body["riskLevel"], "MEDIUM");
}

#[tokio::test]
async fn test_embedded_json_merges_over_defaults() {
    let state = create_test_state(Arc::new(MockProvider::replying(
        "Here is my analysis:\n{\"summary\": \"NFT marketplace\", \"riskLevel\": \"LOW\"}\nLet me know if you need more.",
    )));

    let req = make_request(
        "POST",
        "/api/ai/analyze-contract",
        Some(json!({ "source": "(define-public (list-item) (ok true))", "contractId": "SP000.market" })),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(body["summary"], "NFT marketplace");
    assert_eq!(body["riskLevel"], "LOW");
    assert_eq!(body["securityScore"], "50");
    assert!(body["security"]["bestPractices"]["missing"].is_array());
}

#[tokio::test]
async fn test_malicious_contract_short_circuits() {
    let provider = Arc::new(MockProvider::replying("{}"));
    let state = create_test_state(provider.clone());

    let req = make_request("POST", "/api/ai/analyze-contract", Some(json!({ "source": MALICIOUS })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["riskLevel"], "HIGH");
    assert_eq!(body["securityScore"], "10");
    assert_eq!(body["functions"], json!(["run"]));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_is_idempotent() {
    let state = create_test_state(Arc::new(MockProvider::replying(
        "{\"overallRisk\": \"low\", \"issues\": [{\"severity\": \"low\", \"description\": \"Unused constant\"}]}",
    )));

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let req = make_request("POST", "/api/ai/analyze", Some(json!({ "code": "(define-constant x u1)" })));
        let response = app(&state).oneshot(req).await.unwrap();
        bodies.push(response.into_body().collect().await.unwrap().to_bytes());
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test(start_paused = true)]
async fn test_gateway_failure_statuses() {
    let state = create_test_state(Arc::new(MockProvider::failing(500)));

    let req = make_request("POST", "/api/ai/chat", Some(json!({ "message": "hi" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response_json(response).await["error"], "Failed to get AI response");

    let req = make_request("POST", "/api/ai/analyze-contract", Some(json!({ "source": "(ok true)" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["riskLevel"], "HIGH");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_decode_contract_and_transaction() {
    let tx_id = format!("0x{}", "c4".repeat(32));
    let explorer = MockExplorer::new()
        .with_contract("SP000.counter", "(define-public (increment) (ok u1))")
        .with_events("SP000.counter", vec![json!({ "event_type": "smart_contract_log", "data": { "value": "u1" } })])
        .with_transaction(&tx_id, json!({ "tx_id": tx_id, "tx_type": "contract_call" }));
    let state = create_state_with(
        Arc::new(MockProvider::replying("{\"summary\": \"Analyzed\"}")),
        explorer,
        AppConfig::default(),
    );

    let req = make_request("POST", "/api/ai/decode", Some(json!({ "input": "SP000.counter" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["contractId"], "SP000.counter");
    assert_eq!(body["transactionActivity"][0]["type"], "smart_contract_log");

    let req = make_request("POST", "/api/ai/decode", Some(json!({ "input": tx_id })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["summary"], "Analyzed");
    assert_eq!(body["txType"], "Unknown");
}

#[tokio::test]
async fn test_decode_unavailable_upstream() {
    let state = create_test_state(Arc::new(MockProvider::replying("{}")));

    let req = make_request("POST", "/api/ai/decode", Some(json!({ "input": "SP000.gone" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let req = make_request("POST", "/api/ai/decode", Some(json!({ "input": "ab".repeat(32) })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_api_token_required_when_configured() {
    let mut config = AppConfig::default();
    config.server.api_token = Some("s3cret".into());
    let state = create_state_with(Arc::new(MockProvider::replying("ok")), MockExplorer::new(), config);

    let req = make_request("POST", "/api/ai/chat", Some(json!({ "message": "hi" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/ai/chat")
        .header("content-type", "application/json")
        .header("Authorization", "Bearer s3cret")
        .body(Body::from(json!({ "message": "hi" }).to_string()))
        .unwrap();
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let req = make_request("GET", "/api/health", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_hiro_explorer_endpoints() {
    let upstream = Router::new()
        .route(
            "/v2/contracts/source/SP000/counter",
            get(|| async { axum::Json(json!({ "source": "(ok true)", "publish_height": 42 })) }),
        )
        .route(
            "/extended/v1/contract/SP000.counter/events",
            get(|| async { axum::Json(json!({ "limit": 10, "results": [{ "event_index": 0 }] })) }),
        )
        .route(
            "/extended/v1/tx/0xabc",
            get(|| async { axum::Json(json!({ "tx_id": "0xabc", "tx_status": "success" })) }),
        );
    let base = spawn_upstream(upstream).await;
    let explorer = HiroExplorer::new(&ExplorerConfig { base_url: base, ..ExplorerConfig::default() });

    let source = explorer.contract_source("SP000.counter").await.unwrap();
    assert_eq!(source.source, "(ok true)");
    assert_eq!(source.publish_height, Some(42));

    let events = explorer.contract_events("SP000.counter", 10).await.unwrap();
    assert_eq!(events.len(), 1);

    let tx = explorer.transaction("0xabc").await.unwrap();
    assert_eq!(tx["tx_status"], "success");

    assert!(explorer.contract_source("SP000.missing").await.is_err());
}

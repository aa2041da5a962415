//! Drive the full router against mocked model and swap APIs.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chat_agent::{
    agent::Agent,
    providers::{
        configs::{OpenAiProviderConfig, ProviderConfig},
        factory,
    },
    swaps::http::{HttpSwapService, SwapConfig},
};
use chat_agent_server::{app, state::AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestHarness {
    model: MockServer,
    swap: MockServer,
    router: axum::Router,
}

impl TestHarness {
    async fn new() -> Self {
        let model = MockServer::start().await;
        let swap = MockServer::start().await;

        let timeout = Duration::from_secs(5);
        let provider = factory::get_provider(ProviderConfig::OpenAi(OpenAiProviderConfig {
            host: model.uri(),
            api_key: "test-key".to_string(),
            model: "gpt-4o".to_string(),
            temperature: None,
            max_tokens: None,
            json_mode: true,
            system_prompt: "Classify the message.".to_string(),
            timeout,
        }))
        .expect("provider");
        let swaps = HttpSwapService::new(SwapConfig {
            host: swap.uri(),
            api_key: None,
            timeout,
        })
        .expect("swap service");

        let state = AppState::new(Agent::new(provider, Arc::new(swaps)));
        Self {
            model,
            swap,
            router: app(state),
        }
    }

    /// Make the model answer every completion with `content`
    async fn model_replies(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
            })))
            .mount(&self.model)
            .await;
    }

    async fn post(&self, body: impl Into<Body>) -> (StatusCode, String, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/send-message")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.expect("request");
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = serde_json::from_slice(&bytes).expect("parse JSON");
        (status, content_type, json)
    }

    async fn post_json(&self, body: Value) -> (StatusCode, String, Value) {
        self.post(body.to_string()).await
    }
}

fn greeting() -> Value {
    json!({
        "currentMessage": "hi",
        "messageHistory": [{"sender": "user", "text": "hello"}],
        "permissions": {}
    })
}

fn assert_uniform_error(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Failed to process message");
    assert!(body["error"].is_string(), "missing error description");
}

#[tokio::test]
async fn not_swap_returns_model_text() {
    let harness = TestHarness::new().await;
    harness
        .model_replies(r#"{"intent":"NOT_SWAP","responseText":"Hi there!"}"#)
        .await;

    let (status, content_type, body) = harness.post_json(greeting()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, json!({"message": "Hi there!", "status": "success"}));
    assert!(harness.swap.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn history_is_forwarded_with_mapped_roles() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "system", "content": "Classify the message."},
                {"role": "user", "content": "hello"},
                {"role": "system", "content": "Hey! Want to swap?"},
                {"role": "user", "content": "not now"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"intent\":\"NOT_SWAP\"}"}}]
        })))
        .expect(1)
        .mount(&harness.model)
        .await;

    let (status, _, body) = harness
        .post_json(json!({
            "currentMessage": "not now",
            "messageHistory": [
                {"sender": "user", "text": "hello"},
                {"sender": "bot", "text": "Hey! Want to swap?"}
            ],
            "permissions": null
        }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "I'm sorry, I didn't understand that.", "status": "success"})
    );
}

#[tokio::test]
async fn swap_returns_swap_service_result() {
    let harness = TestHarness::new().await;
    harness.model_replies(r#"{"intent":"SWAP"}"#).await;

    let swap_result = json!({"status": "success", "txHash": "0xfeed", "received": "99.1"});
    Mock::given(method("POST"))
        .and(path("/swap"))
        .and(body_partial_json(json!({"permissions": {"spender": "0x1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(swap_result.clone()))
        .expect(1)
        .mount(&harness.swap)
        .await;

    let (status, _, body) = harness
        .post_json(json!({
            "currentMessage": "swap 100 USDC to ETH",
            "messageHistory": [],
            "permissions": {"spender": "0x1"}
        }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, swap_result);
}

#[tokio::test]
async fn receipt_is_looked_up_by_purchase_id() {
    let harness = TestHarness::new().await;
    harness
        .model_replies(r#"{"intent":"GET_SWAP_RECEIPT","purchaseId":"p-77","amount":10}"#)
        .await;

    let receipt = json!({"purchaseId": "p-77", "amountOut": "0.004", "status": "settled"});
    Mock::given(method("GET"))
        .and(path("/receipts/p-77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt.clone()))
        .expect(1)
        .mount(&harness.swap)
        .await;

    let (status, _, body) = harness.post_json(greeting()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, receipt);
}

#[tokio::test]
async fn receipt_without_purchase_details_fails() {
    let harness = TestHarness::new().await;
    harness.model_replies(r#"{"intent":"GET_SWAP_RECEIPT"}"#).await;

    let (status, content_type, body) = harness.post_json(greeting()).await;

    assert_uniform_error(status, &body);
    assert_eq!(content_type, "application/json");
    assert_eq!(body["error"], "Error occurred getting swap receipt");
    assert!(harness.swap.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unrecognized_intent_fails() {
    let harness = TestHarness::new().await;
    harness.model_replies(r#"{"intent":"STAKE"}"#).await;

    let (status, _, body) = harness.post_json(greeting()).await;

    assert_uniform_error(status, &body);
    assert_eq!(body["error"], "Unhandled intent: STAKE");
}

#[tokio::test]
async fn non_json_model_content_fails() {
    let harness = TestHarness::new().await;
    harness.model_replies("Sure, let me swap that for you.").await;

    let (status, _, body) = harness.post_json(greeting()).await;

    assert_uniform_error(status, &body);
}

#[tokio::test]
async fn empty_model_content_fails() {
    let harness = TestHarness::new().await;
    harness.model_replies("").await;

    let (status, _, body) = harness.post_json(greeting()).await;

    assert_uniform_error(status, &body);
    assert_eq!(body["error"], "Invalid response from model provider");
}

#[tokio::test]
async fn malformed_request_body_fails_uniformly() {
    let harness = TestHarness::new().await;

    let (status, _, body) = harness.post("{not json").await;
    assert_uniform_error(status, &body);

    let (status, _, body) = harness.post_json(json!({"currentMessage": "hi"})).await;
    assert_uniform_error(status, &body);

    assert!(harness.model.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn model_outage_fails_uniformly() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.model)
        .await;

    let (status, _, body) = harness.post_json(greeting()).await;

    assert_uniform_error(status, &body);
    assert!(body["error"].as_str().unwrap().starts_with("Server error: 500"));
}

#[tokio::test]
async fn swap_failure_fails_uniformly() {
    let harness = TestHarness::new().await;
    harness.model_replies(r#"{"intent":"SWAP"}"#).await;
    Mock::given(method("POST"))
        .and(path("/swap"))
        .respond_with(ResponseTemplate::new(422).set_body_string("allowance too low"))
        .mount(&harness.swap)
        .await;

    let (status, _, body) = harness.post_json(greeting()).await;

    assert_uniform_error(status, &body);
    assert_eq!(
        body["error"],
        "Swap service error: 422 Unprocessable Entity: allowance too low"
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let harness = TestHarness::new().await;
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = harness.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

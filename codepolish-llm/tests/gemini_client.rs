//! Integration tests for GeminiClient and RewriteClient using wiremock

use codepolish_llm::{GeminiClient, LlmError, RewriteClient, TextGenerator, NO_CHANGES_MARKER};
use codepolish_utils::AppConfig;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/gemini-2.0-flash:generateContent";

fn create_client(mock_server: &MockServer) -> GeminiClient {
    let config = AppConfig::new("test-api-key").with_gemini_base_url(mock_server.uri());
    GeminiClient::from_config(&config)
}

fn answer(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_generate_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("Hello!")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let text = create_client(&mock_server).generate("Hi").await.unwrap();
    assert_eq!(text, "Hello!");
}

#[tokio::test]
async fn test_api_key_stays_out_of_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("ok")))
        .mount(&mock_server)
        .await;

    create_client(&mock_server).generate("Hi").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
    assert!(!requests[0].url.as_str().contains("test-api-key"));
}

#[tokio::test]
async fn test_transport_error_hides_api_key() {
    // Nothing listens on the discard port
    let config = AppConfig::new("SUPERSECRETKEY").with_gemini_base_url("http://127.0.0.1:9");
    let client = GeminiClient::from_config(&config);

    let err = client.generate("Hi").await.unwrap_err();

    assert!(matches!(err, LlmError::Http(_)));
    let message = err.to_string();
    assert!(message.starts_with("Gemini API request failed"), "unexpected error: {}", message);
    assert!(!message.contains("SUPERSECRETKEY"));
}

#[tokio::test]
async fn test_undecodable_body_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = create_client(&mock_server).generate("Hi").await.unwrap_err();
    assert!(matches!(err, LlmError::Http(_)));
    assert!(!err.to_string().contains("test-api-key"));
}

#[tokio::test]
async fn test_generate_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&mock_server)
        .await;

    let err = create_client(&mock_server).generate("Hi").await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("429"), "unexpected error: {}", message);
    assert!(message.contains("Resource exhausted"));
}

#[tokio::test]
async fn test_generate_without_candidates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})))
        .mount(&mock_server)
        .await;

    assert!(create_client(&mock_server).generate("Hi").await.is_err());
}

#[tokio::test]
async fn test_rewrite_over_http() {
    let mock_server = MockServer::start().await;
    let body = "```python\ndef add(a, b):\n    return a + b\n```\n\n### Summary\n- Added spacing";

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(body)))
        .mount(&mock_server)
        .await;

    let rewriter = RewriteClient::new(create_client(&mock_server));
    let result = rewriter.improve("def add(a,b): return a+b", "readability").await;

    assert_eq!(result.code, "def add(a, b):\n    return a + b");
    assert_eq!(result.summary, body);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("**readability**"));
    assert!(prompt.contains("def add(a,b): return a+b"));
}

#[tokio::test]
async fn test_rewrite_falls_back_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&mock_server)
        .await;

    let rewriter = RewriteClient::new(create_client(&mock_server));
    let result = rewriter.improve("x = 1\n", "security").await;

    assert_eq!(result.code, "x = 1\n");
    assert_eq!(result.summary, NO_CHANGES_MARKER);
}

//! Integration tests for the Ollama client against a mock endpoint

use crate::common::{setup_test_logging, test_ollama_config};
use codebox_llm::{LlmError, OllamaClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_generate_returns_response_text() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "tinyllama",
            "prompt": "say hi",
            "stream": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "```python\nprint('hi')\n```",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaClient::new(&test_ollama_config(&server.uri())).unwrap();
    let text = client.generate("tinyllama", "say hi", None).await.unwrap();
    assert_eq!(text, "```python\nprint('hi')\n```");
}

#[tokio::test]
async fn test_generate_forwards_system_instruction() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"system": "be terse"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaClient::new(&test_ollama_config(&server.uri())).unwrap();
    let text = client
        .generate("tinyllama", "say hi", Some("be terse"))
        .await
        .unwrap();
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn test_generate_missing_response_field_is_empty() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"done": true})))
        .mount(&server)
        .await;

    let client = OllamaClient::new(&test_ollama_config(&server.uri())).unwrap();
    let text = client.generate("tinyllama", "hi", None).await.unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_generate_http_error_is_network_error() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model exploded"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(&test_ollama_config(&server.uri())).unwrap();
    let err = client.generate("tinyllama", "hi", None).await.unwrap_err();
    match err {
        LlmError::Network(msg) => assert!(msg.contains("500")),
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_malformed_body_is_parse_error() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(&test_ollama_config(&server.uri())).unwrap();
    let err = client.generate("tinyllama", "hi", None).await.unwrap_err();
    assert!(matches!(err, LlmError::Parse(_)));
}

#[tokio::test]
async fn test_list_models_returns_names() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {"name": "tinyllama", "size": 637_000_000},
                {"name": "llama3:8b", "size": 4_700_000_000u64},
            ],
        })))
        .mount(&server)
        .await;

    let client = OllamaClient::new(&test_ollama_config(&server.uri())).unwrap();
    assert_eq!(client.list_models().await, vec!["tinyllama", "llama3:8b"]);
}

#[tokio::test]
async fn test_list_models_swallows_unreachable_endpoint() {
    setup_test_logging();

    // Nothing is listening here.
    let client = OllamaClient::new(&test_ollama_config("http://127.0.0.1:1")).unwrap();
    assert!(client.list_models().await.is_empty());
}

#[tokio::test]
async fn test_list_models_swallows_malformed_body() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(&test_ollama_config(&server.uri())).unwrap();
    assert!(client.list_models().await.is_empty());
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP-level tests for the remote adapters.
//!
//! Each test stands up a mockito server in place of the API and checks:
//! - the request shape per protocol (wrapper vs raw prompt, token fields)
//! - normalization of the returned envelope
//! - classification of failures as unavailable vs malformed

use mockito::Matcher;
use promptbench_core::domain::llm::{BackendAdapter, BackendError};
use promptbench_core::domain::model::{BackendKind, ModelDescriptor};
use promptbench_core::domain::normalize::render_assistant_prompt;
use promptbench_core::infrastructure::credentials::ApiCredential;
use promptbench_core::infrastructure::llm::{
    ChatCompletionAdapter, LegacyCompletionAdapter, OpenAIClient, ReasoningChatAdapter,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn client(server: &mockito::Server) -> Arc<OpenAIClient> {
    Arc::new(OpenAIClient::new(server.url(), ApiCredential::new("sk-test"), None).unwrap())
}

fn chat_body(content: serde_json::Value) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 5, "completion_tokens": 3, "total_tokens": 8}
    })
    .to_string()
}

#[tokio::test]
async fn test_legacy_completion_wraps_prompt_and_trims() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::Json(json!({
            "model": "davinci-002",
            "prompt": render_assistant_prompt("Hello"),
            "max_tokens": 4096
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": [{"text": "  World\n", "index": 0}]}).to_string())
        .create_async()
        .await;

    let adapter = LegacyCompletionAdapter::new(client(&server));
    let descriptor = ModelDescriptor::new("GPT-3", BackendKind::LegacyCompletion, "davinci-002");

    let record = adapter.generate(&descriptor, "Hello", 4096).await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.model_label, "GPT-3");
    assert_eq!(record.normalized_text, "World");
}

#[tokio::test]
async fn test_chat_sends_raw_prompt_with_max_tokens() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Json(json!({
            "model": "gpt-3.5-turbo-0125",
            "messages": [{"role": "user", "content": "Hello"}],
            "max_tokens": 4096
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(json!("\nHi there!  ")))
        .create_async()
        .await;

    let adapter = ChatCompletionAdapter::new(client(&server));
    let descriptor = ModelDescriptor::new("GPT-3.5", BackendKind::ChatCompletion, "gpt-3.5-turbo-0125");

    let record = adapter.generate(&descriptor, "Hello", 4096).await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.normalized_text, "Hi there!");
}

#[tokio::test]
async fn test_reasoning_chat_inflates_budget_and_requests_high_effort() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Json(json!({
            "model": "o3-mini-2025-01-31",
            "messages": [{"role": "user", "content": "Hello"}],
            "max_completion_tokens": 20480,
            "reasoning_effort": "high"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(json!("Reasoned answer")))
        .create_async()
        .await;

    let adapter = ReasoningChatAdapter::new(client(&server));
    let descriptor = ModelDescriptor::new("o3-mini", BackendKind::ReasoningChat, "o3-mini-2025-01-31");

    let record = adapter.generate(&descriptor, "Hello", 4096).await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.normalized_text, "Reasoned answer");
}

#[tokio::test]
async fn test_empty_content_is_a_successful_empty_answer() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(json!("   ")))
        .create_async()
        .await;

    let adapter = ChatCompletionAdapter::new(client(&server));
    let descriptor = ModelDescriptor::new("GPT-3.5", BackendKind::ChatCompletion, "gpt-3.5-turbo-0125");

    let record = adapter.generate(&descriptor, "Hello", 4096).await.unwrap();
    assert_eq!(record.normalized_text, "");
}

#[tokio::test]
async fn test_null_content_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(serde_json::Value::Null))
        .create_async()
        .await;

    let adapter = ReasoningChatAdapter::new(client(&server));
    let descriptor = ModelDescriptor::new("o3-mini", BackendKind::ReasoningChat, "o3-mini-2025-01-31");

    let err = adapter.generate(&descriptor, "Hello", 4096).await.unwrap_err();
    assert!(matches!(err, BackendError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_missing_choices_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": []}).to_string())
        .create_async()
        .await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"object": "chat.completion"}).to_string())
        .create_async()
        .await;

    let legacy = LegacyCompletionAdapter::new(client(&server));
    let descriptor = ModelDescriptor::new("GPT-3", BackendKind::LegacyCompletion, "davinci-002");
    let err = legacy.generate(&descriptor, "Hello", 4096).await.unwrap_err();
    assert!(matches!(err, BackendError::MalformedResponse(_)));

    let chat = ChatCompletionAdapter::new(client(&server));
    let descriptor = ModelDescriptor::new("GPT-3.5", BackendKind::ChatCompletion, "gpt-3.5-turbo-0125");
    let err = chat.generate(&descriptor, "Hello", 4096).await.unwrap_err();
    assert!(matches!(err, BackendError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let adapter = ChatCompletionAdapter::new(client(&server));
    let descriptor = ModelDescriptor::new("GPT-3.5", BackendKind::ChatCompletion, "gpt-3.5-turbo-0125");

    let err = adapter.generate(&descriptor, "Hello", 4096).await.unwrap_err();
    assert!(matches!(err, BackendError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_auth_failure_is_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(json!({"error": {"message": "Incorrect API key provided"}}).to_string())
        .create_async()
        .await;

    let adapter = ChatCompletionAdapter::new(client(&server));
    let descriptor = ModelDescriptor::new("GPT-3.5", BackendKind::ChatCompletion, "gpt-3.5-turbo-0125");

    let err = adapter.generate(&descriptor, "Hello", 4096).await.unwrap_err();
    match err {
        BackendError::Unavailable(msg) => assert!(msg.contains("Authentication failed")),
        other => panic!("expected Unavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/completions")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let adapter = LegacyCompletionAdapter::new(client(&server));
    let descriptor = ModelDescriptor::new("GPT-3", BackendKind::LegacyCompletion, "davinci-002");

    let err = adapter.generate(&descriptor, "Hello", 4096).await.unwrap_err();
    assert_eq!(err, BackendError::Unavailable("HTTP 503: overloaded".to_string()));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unavailable() {
    // Port 9 (discard) on localhost is expected to refuse connections
    let client = Arc::new(
        OpenAIClient::new(
            "http://127.0.0.1:9",
            ApiCredential::new("sk-test"),
            Some(Duration::from_secs(5)),
        )
        .unwrap(),
    );
    let adapter = ChatCompletionAdapter::new(client);
    let descriptor = ModelDescriptor::new("GPT-3.5", BackendKind::ChatCompletion, "gpt-3.5-turbo-0125");

    let err = adapter.generate(&descriptor, "Hello", 4096).await.unwrap_err();
    assert!(matches!(err, BackendError::Unavailable(_)));
}

#[tokio::test]
async fn test_request_timeout_becomes_unavailable_cell() {
    use promptbench_core::application::RunOrchestrator;
    use promptbench_core::domain::bench_config::{BenchConfigSpec, ModelEntry};
    use promptbench_core::domain::result::{CellOutcome, FailureKind};
    use promptbench_core::infrastructure::llm::build_dispatcher;

    // Accepts connections and never writes a response
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let mut spec = BenchConfigSpec::default();
    spec.openai.endpoint = format!("http://{}", addr);
    spec.openai.api_key = Some("sk-test".to_string());
    spec.openai.request_timeout_secs = Some(1);
    spec.models = vec![ModelEntry {
        label: "X".to_string(),
        backend: BackendKind::ChatCompletion,
        model: "gpt-3.5-turbo-0125".to_string(),
        enabled: true,
    }];
    let registry = spec.model_registry().unwrap();
    let dispatcher = build_dispatcher(&spec, &registry).unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        RunOrchestrator::new(dispatcher).run(&["Hello"], &registry),
    )
    .await
    .expect("client timeout should fire first")
    .unwrap();

    let cell = &result.prompts()[0].responses[0];
    assert_eq!(cell.model, "X");
    match &cell.outcome {
        CellOutcome::Error(failure) => {
            assert_eq!(failure.kind, FailureKind::BackendUnavailable);
            assert!(
                failure.message.starts_with("Request timed out"),
                "unexpected message: {}",
                failure.message
            );
        }
        other => panic!("expected error cell, got {:?}", other),
    }
}

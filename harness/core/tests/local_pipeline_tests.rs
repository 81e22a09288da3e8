// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Tests for the Hugging Face pipeline server integration.

use mockito::Matcher;
use promptbench_core::domain::llm::{BackendAdapter, BackendError};
use promptbench_core::domain::model::{BackendKind, ModelDescriptor};
use promptbench_core::domain::normalize::render_assistant_prompt;
use promptbench_core::infrastructure::llm::{HuggingFacePipelineLoader, LocalPipelineAdapter};
use serde_json::json;
use std::sync::Arc;

fn adapter(server: &mockito::Server) -> LocalPipelineAdapter {
    let loader = HuggingFacePipelineLoader::new(server.url(), None, None).unwrap();
    LocalPipelineAdapter::new(Arc::new(loader))
}

fn gpt1() -> ModelDescriptor {
    ModelDescriptor::new("GPT-1", BackendKind::LocalPipeline, "openai-community/openai-gpt")
}

#[tokio::test]
async fn test_pipeline_request_and_echo_stripping() {
    let wrapper = render_assistant_prompt("Hello");
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/openai-community/openai-gpt")
        .match_body(Matcher::Json(json!({
            "inputs": wrapper,
            "parameters": {"max_length": 500, "return_full_text": true}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{"generated_text": format!("{} Answer.", wrapper)}]).to_string())
        .expect(2)
        .create_async()
        .await;

    let adapter = adapter(&server);

    for _ in 0..2 {
        let record = adapter.generate(&gpt1(), "Hello", 500).await.unwrap();
        assert_eq!(record.model_label, "GPT-1");
        assert_eq!(record.normalized_text, "Answer.");
    }

    mock.assert_async().await;
    assert_eq!(adapter.cache().loaded_count(), 1);
}

#[tokio::test]
async fn test_single_object_envelope_accepted() {
    let wrapper = render_assistant_prompt("Hi");
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/openai-community/openai-gpt")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"generated_text": format!("{}\n  Hello!", wrapper)}).to_string())
        .create_async()
        .await;

    let record = adapter(&server).generate(&gpt1(), "Hi", 500).await.unwrap();
    assert_eq!(record.normalized_text, "Hello!");
}

#[tokio::test]
async fn test_empty_batch_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/openai-community/openai-gpt")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let err = adapter(&server).generate(&gpt1(), "Hi", 500).await.unwrap_err();
    assert!(matches!(err, BackendError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_missing_generated_text_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/openai-community/openai-gpt")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{"text": "nope"}]).to_string())
        .create_async()
        .await;

    let err = adapter(&server).generate(&gpt1(), "Hi", 500).await.unwrap_err();
    assert!(matches!(err, BackendError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_model_not_loaded_is_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/openai-community/openai-gpt")
        .with_status(404)
        .create_async()
        .await;

    let err = adapter(&server).generate(&gpt1(), "Hi", 500).await.unwrap_err();
    assert_eq!(
        err,
        BackendError::Unavailable("Model not found: openai-community/openai-gpt".to_string())
    );
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Chat Completion Adapters
//
// Chat-native models receive the raw prompt as a single user message with
// no assistant-context wrapper. Reasoning models spend hidden tokens on
// deliberation, so their cap is inflated and the highest effort requested.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::openai::OpenAIClient;
use crate::domain::llm::{BackendAdapter, BackendError, InvocationRequest};
use crate::domain::model::{BackendKind, ModelDescriptor, REASONING_BUDGET_MULTIPLIER};
use crate::domain::normalize::normalize_answer;
use crate::domain::result::ResponseRecord;

/// Highest deliberation setting the reasoning endpoint accepts
pub const REASONING_EFFORT: &str = "high";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'a str>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

fn user_request(invocation: &InvocationRequest) -> ChatRequest<'_> {
    ChatRequest {
        model: &invocation.backend_model_id,
        messages: vec![ChatMessage {
            role: "user",
            content: &invocation.rendered_prompt,
        }],
        max_tokens: None,
        max_completion_tokens: None,
        reasoning_effort: None,
    }
}

async fn send_chat(
    client: &OpenAIClient,
    descriptor: &ModelDescriptor,
    request: &ChatRequest<'_>,
) -> Result<ResponseRecord, BackendError> {
    let response: ChatResponse = client
        .post("chat/completions", request, request.model)
        .await?;

    let content = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::MalformedResponse("No choices in chat response".into()))?
        .message
        .content
        .ok_or_else(|| BackendError::MalformedResponse("Assistant message has no content".into()))?;

    Ok(ResponseRecord::new(descriptor.label.clone(), normalize_answer(&content)))
}

fn raw_invocation(descriptor: &ModelDescriptor, prompt: &str, max_output_tokens: u32) -> InvocationRequest {
    InvocationRequest {
        backend_model_id: descriptor.backend_model_id.clone(),
        rendered_prompt: prompt.to_string(),
        max_output_tokens,
    }
}

pub struct ChatCompletionAdapter {
    client: Arc<OpenAIClient>,
}

impl ChatCompletionAdapter {
    pub fn new(client: Arc<OpenAIClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BackendAdapter for ChatCompletionAdapter {
    fn kind(&self) -> BackendKind {
        BackendKind::ChatCompletion
    }

    async fn generate(
        &self,
        descriptor: &ModelDescriptor,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<ResponseRecord, BackendError> {
        let invocation = raw_invocation(descriptor, prompt, max_output_tokens);
        let mut request = user_request(&invocation);
        request.max_tokens = Some(invocation.max_output_tokens);

        send_chat(&self.client, descriptor, &request).await
    }
}

pub struct ReasoningChatAdapter {
    client: Arc<OpenAIClient>,
}

impl ReasoningChatAdapter {
    pub fn new(client: Arc<OpenAIClient>) -> Self {
        Self { client }
    }

    /// Completion-token cap actually sent for a nominal budget
    pub fn effective_cap(max_output_tokens: u32) -> u32 {
        max_output_tokens.saturating_mul(REASONING_BUDGET_MULTIPLIER)
    }
}

#[async_trait]
impl BackendAdapter for ReasoningChatAdapter {
    fn kind(&self) -> BackendKind {
        BackendKind::ReasoningChat
    }

    async fn generate(
        &self,
        descriptor: &ModelDescriptor,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<ResponseRecord, BackendError> {
        let invocation = raw_invocation(descriptor, prompt, Self::effective_cap(max_output_tokens));
        let mut request = user_request(&invocation);
        request.max_completion_tokens = Some(invocation.max_output_tokens);
        request.reasoning_effort = Some(REASONING_EFFORT);

        send_chat(&self.client, descriptor, &request).await
    }
}

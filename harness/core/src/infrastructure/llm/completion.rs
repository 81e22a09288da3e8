// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Legacy Completion Adapter
//
// Free-form completion endpoint for models without a chat mode. The prompt
// is wrapped in the assistant-conversation frame; the backend returns only
// the continuation, so the answer is just trimmed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::openai::OpenAIClient;
use crate::domain::llm::{BackendAdapter, BackendError, InvocationRequest};
use crate::domain::model::{BackendKind, ModelDescriptor};
use crate::domain::normalize::{normalize_answer, render_assistant_prompt};
use crate::domain::result::ResponseRecord;

pub struct LegacyCompletionAdapter {
    client: Arc<OpenAIClient>,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: Option<String>,
}

impl LegacyCompletionAdapter {
    pub fn new(client: Arc<OpenAIClient>) -> Self {
        Self { client }
    }

    fn build_request(descriptor: &ModelDescriptor, prompt: &str, max_output_tokens: u32) -> InvocationRequest {
        InvocationRequest {
            backend_model_id: descriptor.backend_model_id.clone(),
            rendered_prompt: render_assistant_prompt(prompt),
            max_output_tokens,
        }
    }
}

#[async_trait]
impl BackendAdapter for LegacyCompletionAdapter {
    fn kind(&self) -> BackendKind {
        BackendKind::LegacyCompletion
    }

    async fn generate(
        &self,
        descriptor: &ModelDescriptor,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<ResponseRecord, BackendError> {
        let invocation = Self::build_request(descriptor, prompt, max_output_tokens);
        let request = CompletionRequest {
            model: &invocation.backend_model_id,
            prompt: &invocation.rendered_prompt,
            max_tokens: invocation.max_output_tokens,
        };

        let response: CompletionResponse = self
            .client
            .post("completions", &request, &invocation.backend_model_id)
            .await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::MalformedResponse("No choices in completion response".into()))?
            .text
            .ok_or_else(|| BackendError::MalformedResponse("Completion choice has no text".into()))?;

        Ok(ResponseRecord::new(descriptor.label.clone(), normalize_answer(&text)))
    }
}

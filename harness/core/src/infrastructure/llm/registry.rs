// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Adapter Registry - builds the Dispatcher from configuration
//
// Only kinds used by the model registry get an adapter. The remote
// credential is resolved here, before any backend call; a missing key
// fails the whole run.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::chat::{ChatCompletionAdapter, ReasoningChatAdapter};
use super::completion::LegacyCompletionAdapter;
use super::local_pipeline::{HuggingFacePipelineLoader, LocalPipelineAdapter};
use super::openai::OpenAIClient;
use crate::application::dispatcher::Dispatcher;
use crate::domain::bench_config::BenchConfigSpec;
use crate::domain::error::BenchError;
use crate::domain::llm::BackendAdapter;
use crate::domain::model::{BackendKind, ModelRegistry};
use crate::infrastructure::credentials::{require_api_key, resolve_api_key};

pub fn build_dispatcher(
    spec: &BenchConfigSpec,
    registry: &ModelRegistry,
) -> Result<Dispatcher, BenchError> {
    info!("Initializing backend adapters");

    let openai = if registry.requires_credential() {
        let credential = require_api_key(&spec.openai.api_key)?;
        info!("Using remote API endpoint {}", spec.openai.endpoint);
        Some(Arc::new(OpenAIClient::new(
            spec.openai.endpoint.clone(),
            credential,
            spec.openai.request_timeout_secs.map(Duration::from_secs),
        )?))
    } else {
        None
    };

    let mut dispatcher = Dispatcher::new().with_max_tokens_override(spec.generation.max_tokens);

    for kind in registry.backend_kinds() {
        let adapter: Arc<dyn BackendAdapter> = match (kind, &openai) {
            (BackendKind::LocalPipeline, _) => {
                let loader = HuggingFacePipelineLoader::new(
                    spec.local_pipeline.endpoint.clone(),
                    resolve_api_key(&spec.local_pipeline.api_key)?,
                    spec.local_pipeline.request_timeout_secs.map(Duration::from_secs),
                )?;
                Arc::new(LocalPipelineAdapter::new(Arc::new(loader)))
            }
            (BackendKind::LegacyCompletion, Some(client)) => {
                Arc::new(LegacyCompletionAdapter::new(client.clone()))
            }
            (BackendKind::ChatCompletion, Some(client)) => {
                Arc::new(ChatCompletionAdapter::new(client.clone()))
            }
            (BackendKind::ReasoningChat, Some(client)) => {
                Arc::new(ReasoningChatAdapter::new(client.clone()))
            }
            (_, None) => {
                return Err(BenchError::Configuration(format!(
                    "Backend kind '{}' requires the remote API client",
                    kind
                )))
            }
        };

        info!(
            "Registered {} adapter (budget {} tokens)",
            kind,
            dispatcher.effective_max_tokens(kind)
        );
        dispatcher = dispatcher.with_adapter(adapter);
    }

    Ok(dispatcher)
}

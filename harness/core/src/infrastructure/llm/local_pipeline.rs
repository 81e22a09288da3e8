// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Local Pipeline Adapter
//
// Anti-Corruption Layer for locally hosted text-generation pipelines.
// Base models have no chat mode, so the prompt goes out wrapped in the
// assistant-conversation frame. Pipelines return the input followed by the
// continuation; the echoed frame is stripped by exact prefix match.
//
// Loaded pipelines are cached per backend model id and reused for the rest
// of the run. Nothing mutates a pipeline after load.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::http::{build_client, post_json};
use crate::domain::error::BenchError;
use crate::domain::llm::{BackendAdapter, BackendError, InvocationRequest};
use crate::domain::model::{BackendKind, ModelDescriptor};
use crate::domain::normalize::{render_assistant_prompt, strip_echoed_prompt};
use crate::domain::result::ResponseRecord;
use crate::infrastructure::credentials::ApiCredential;

/// A loaded generation model
#[async_trait]
pub trait TextGenerationPipeline: Send + Sync {
    /// Generate up to `max_length` total tokens (input included).
    /// The returned text starts with `input`.
    async fn generate(&self, input: &str, max_length: u32) -> Result<String, BackendError>;
}

/// Loads a pipeline for a backend model id
#[async_trait]
pub trait PipelineLoader: Send + Sync {
    async fn load(&self, model_id: &str) -> Result<Arc<dyn TextGenerationPipeline>, BackendError>;
}

/// Lazily populated, load-once cache keyed by backend model id
pub struct PipelineCache {
    loader: Arc<dyn PipelineLoader>,
    pipelines: DashMap<String, Arc<dyn TextGenerationPipeline>>,
}

impl PipelineCache {
    pub fn new(loader: Arc<dyn PipelineLoader>) -> Self {
        Self {
            loader,
            pipelines: DashMap::new(),
        }
    }

    pub async fn get_or_load(
        &self,
        model_id: &str,
    ) -> Result<Arc<dyn TextGenerationPipeline>, BackendError> {
        let cached = self.pipelines.get(model_id).map(|p| p.value().clone());
        if let Some(pipeline) = cached {
            return Ok(pipeline);
        }

        info!("Loading model: {}", model_id);
        let pipeline = self.loader.load(model_id).await?;
        Ok(self
            .pipelines
            .entry(model_id.to_string())
            .or_insert(pipeline)
            .value()
            .clone())
    }

    pub fn loaded_count(&self) -> usize {
        self.pipelines.len()
    }
}

pub struct LocalPipelineAdapter {
    cache: PipelineCache,
}

impl LocalPipelineAdapter {
    pub fn new(loader: Arc<dyn PipelineLoader>) -> Self {
        Self {
            cache: PipelineCache::new(loader),
        }
    }

    pub fn cache(&self) -> &PipelineCache {
        &self.cache
    }
}

#[async_trait]
impl BackendAdapter for LocalPipelineAdapter {
    fn kind(&self) -> BackendKind {
        BackendKind::LocalPipeline
    }

    async fn generate(
        &self,
        descriptor: &ModelDescriptor,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<ResponseRecord, BackendError> {
        let invocation = InvocationRequest {
            backend_model_id: descriptor.backend_model_id.clone(),
            rendered_prompt: render_assistant_prompt(prompt),
            max_output_tokens,
        };

        let pipeline = self.cache.get_or_load(&invocation.backend_model_id).await?;
        let generated = pipeline
            .generate(&invocation.rendered_prompt, invocation.max_output_tokens)
            .await?;

        Ok(ResponseRecord::new(
            descriptor.label.clone(),
            strip_echoed_prompt(&generated, &invocation.rendered_prompt),
        ))
    }
}

// Hugging Face pipeline server
//
// POST {endpoint}/models/{model_id}
//   {"inputs": "...", "parameters": {"max_length": N, "return_full_text": true}}
// -> [{"generated_text": "..."}]

pub struct HuggingFacePipelineLoader {
    client: reqwest::Client,
    endpoint: String,
    credential: Option<ApiCredential>,
}

impl HuggingFacePipelineLoader {
    pub fn new(
        endpoint: impl Into<String>,
        credential: Option<ApiCredential>,
        timeout: Option<Duration>,
    ) -> Result<Self, BenchError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
            credential,
        })
    }
}

#[async_trait]
impl PipelineLoader for HuggingFacePipelineLoader {
    async fn load(&self, model_id: &str) -> Result<Arc<dyn TextGenerationPipeline>, BackendError> {
        Ok(Arc::new(HuggingFacePipeline {
            client: self.client.clone(),
            url: format!("{}/models/{}", self.endpoint.trim_end_matches('/'), model_id),
            model_id: model_id.to_string(),
            credential: self.credential.clone(),
        }))
    }
}

struct HuggingFacePipeline {
    client: reqwest::Client,
    url: String,
    model_id: String,
    credential: Option<ApiCredential>,
}

#[derive(Serialize)]
struct PipelineRequest<'a> {
    inputs: &'a str,
    parameters: PipelineParameters,
}

#[derive(Serialize)]
struct PipelineParameters {
    max_length: u32,
    return_full_text: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PipelineResponse {
    Batch(Vec<GeneratedSequence>),
    Single(GeneratedSequence),
}

#[derive(Deserialize)]
struct GeneratedSequence {
    generated_text: String,
}

#[async_trait]
impl TextGenerationPipeline for HuggingFacePipeline {
    async fn generate(&self, input: &str, max_length: u32) -> Result<String, BackendError> {
        let request = PipelineRequest {
            inputs: input,
            parameters: PipelineParameters {
                max_length,
                return_full_text: true,
            },
        };

        let response: PipelineResponse = post_json(
            &self.client,
            &self.url,
            self.credential.as_ref().map(|c| c.expose()),
            &request,
            &self.model_id,
        )
        .await?;

        match response {
            PipelineResponse::Single(sequence) => Ok(sequence.generated_text),
            PipelineResponse::Batch(sequences) => sequences
                .into_iter()
                .next()
                .map(|s| s.generated_text)
                .ok_or_else(|| BackendError::MalformedResponse("Pipeline returned no sequences".into())),
        }
    }
}

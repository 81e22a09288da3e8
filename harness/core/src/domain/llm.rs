// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Llm
//!
//! Backend adapter contract.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Isolates the run orchestration from vendor response envelopes

// Backend Adapter Domain Interface (Anti-Corruption Layer)
//
// Every adapter turns (descriptor, prompt, budget) into a normalized
// ResponseRecord. Raw response envelopes never leave infrastructure/llm/.

use async_trait::async_trait;

use super::model::{BackendKind, ModelDescriptor};
use super::result::ResponseRecord;

/// Domain interface for one invocation protocol
#[async_trait]
pub trait BackendAdapter: Send + Sync {
    /// Backend kind this adapter serves
    fn kind(&self) -> BackendKind;

    /// Invoke the backend and return the normalized answer
    async fn generate(
        &self,
        descriptor: &ModelDescriptor,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<ResponseRecord, BackendError>;
}

/// Per-call request handed to a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub backend_model_id: String,
    pub rendered_prompt: String,
    pub max_output_tokens: u32,
}

/// Errors a single backend call can produce
///
/// A successful empty answer is not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Network, timeout, authentication or non-success status
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Envelope could not be parsed or lacked the expected field
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

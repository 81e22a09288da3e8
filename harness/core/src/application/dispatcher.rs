// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Backend Dispatcher
//
// Pure routing: the adapter is chosen by `descriptor.backend_kind` alone.
// One slot per kind; adding a kind means adding a slot and a match arm.

use std::sync::Arc;
use tracing::debug;

use crate::domain::error::BenchError;
use crate::domain::llm::BackendAdapter;
use crate::domain::model::{BackendKind, ModelDescriptor};
use crate::domain::result::ResponseRecord;

#[derive(Default, Clone)]
pub struct Dispatcher {
    local_pipeline: Option<Arc<dyn BackendAdapter>>,
    legacy_completion: Option<Arc<dyn BackendAdapter>>,
    chat_completion: Option<Arc<dyn BackendAdapter>>,
    reasoning_chat: Option<Arc<dyn BackendAdapter>>,
    max_tokens_override: Option<u32>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `adapter` in the slot for the kind it reports.
    /// A later registration for the same kind replaces the earlier one.
    pub fn with_adapter(mut self, adapter: Arc<dyn BackendAdapter>) -> Self {
        let kind = adapter.kind();
        *self.slot_mut(kind) = Some(adapter);
        self
    }

    pub fn with_max_tokens_override(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens_override = max_tokens;
        self
    }

    fn slot_mut(&mut self, kind: BackendKind) -> &mut Option<Arc<dyn BackendAdapter>> {
        match kind {
            BackendKind::LocalPipeline => &mut self.local_pipeline,
            BackendKind::LegacyCompletion => &mut self.legacy_completion,
            BackendKind::ChatCompletion => &mut self.chat_completion,
            BackendKind::ReasoningChat => &mut self.reasoning_chat,
        }
    }

    fn adapter_for(&self, kind: BackendKind) -> Option<&Arc<dyn BackendAdapter>> {
        match kind {
            BackendKind::LocalPipeline => self.local_pipeline.as_ref(),
            BackendKind::LegacyCompletion => self.legacy_completion.as_ref(),
            BackendKind::ChatCompletion => self.chat_completion.as_ref(),
            BackendKind::ReasoningChat => self.reasoning_chat.as_ref(),
        }
    }

    pub fn supports(&self, kind: BackendKind) -> bool {
        self.adapter_for(kind).is_some()
    }

    /// Nominal budget handed to the adapter for `kind`
    pub fn effective_max_tokens(&self, kind: BackendKind) -> u32 {
        self.max_tokens_override
            .unwrap_or_else(|| kind.default_max_tokens())
    }

    pub async fn dispatch(
        &self,
        descriptor: &ModelDescriptor,
        prompt: &str,
    ) -> Result<ResponseRecord, BenchError> {
        let adapter = self
            .adapter_for(descriptor.backend_kind)
            .ok_or(BenchError::UnknownBackendKind(descriptor.backend_kind))?;

        let max_tokens = self.effective_max_tokens(descriptor.backend_kind);
        debug!(
            model = %descriptor.label,
            kind = %descriptor.backend_kind,
            max_tokens,
            "Dispatching prompt"
        );

        Ok(adapter.generate(descriptor, prompt, max_tokens).await?)
    }
}

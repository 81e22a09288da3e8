// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Model
//!
//! Static registry mapping human-readable model labels to the backend
//! protocol and backend-specific model identifier used to reach them.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Backend kind is decided once here, never re-derived from model id strings

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::error::BenchError;

/// Reasoning models get this multiple of the nominal token budget
pub const REASONING_BUDGET_MULTIPLIER: u32 = 5;

/// Largest nominal budget whose reasoning cap is still an exact multiple
pub const MAX_TOKEN_BUDGET: u32 = u32::MAX / REASONING_BUDGET_MULTIPLIER;

/// Invocation protocol used to reach a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Locally hosted text-generation pipeline (echoes its input)
    LocalPipeline,

    /// Free-form completion endpoint, prompt wrapped in assistant context
    LegacyCompletion,

    /// Chat endpoint, raw prompt as a single user message
    ChatCompletion,

    /// Chat endpoint for reasoning models (inflated budget, high effort)
    ReasoningChat,
}

impl BackendKind {
    pub const ALL: [BackendKind; 4] = [
        BackendKind::LocalPipeline,
        BackendKind::LegacyCompletion,
        BackendKind::ChatCompletion,
        BackendKind::ReasoningChat,
    ];

    /// Token budget used when no override is supplied
    pub fn default_max_tokens(&self) -> u32 {
        match self {
            BackendKind::LocalPipeline => 500,
            BackendKind::LegacyCompletion
            | BackendKind::ChatCompletion
            | BackendKind::ReasoningChat => 4096,
        }
    }

    /// Remote kinds need the API credential
    pub fn is_remote(&self) -> bool {
        !matches!(self, BackendKind::LocalPipeline)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::LocalPipeline => "local-pipeline",
            BackendKind::LegacyCompletion => "legacy-completion",
            BackendKind::ChatCompletion => "chat-completion",
            BackendKind::ReasoningChat => "reasoning-chat",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static record identifying a logical model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Human-readable label, unique within a registry (e.g. "GPT-3.5")
    pub label: String,

    /// Protocol used to reach the model
    pub backend_kind: BackendKind,

    /// Identifier understood by the backend (e.g. "gpt-3.5-turbo-0125")
    pub backend_model_id: String,
}

impl ModelDescriptor {
    pub fn new(
        label: impl Into<String>,
        backend_kind: BackendKind,
        backend_model_id: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            backend_kind,
            backend_model_id: backend_model_id.into(),
        }
    }
}

/// Ordered, label-unique set of model descriptors
///
/// Iteration follows insertion order, which fixes the order of responses
/// within every prompt result.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    entries: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    pub fn new(entries: Vec<ModelDescriptor>) -> Result<Self, BenchError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.label.as_str()) {
                return Err(BenchError::DuplicateModel(entry.label.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, label: &str) -> Result<&ModelDescriptor, BenchError> {
        self.entries
            .iter()
            .find(|d| d.label == label)
            .ok_or_else(|| BenchError::UnknownModel(label.to_string()))
    }

    /// Restrict the registry to `labels`, keeping registry order
    pub fn select<S: AsRef<str>>(&self, labels: &[S]) -> Result<Self, BenchError> {
        for label in labels {
            self.lookup(label.as_ref())?;
        }
        let entries = self
            .entries
            .iter()
            .filter(|d| labels.iter().any(|l| l.as_ref() == d.label))
            .cloned()
            .collect();
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct backend kinds in use
    pub fn backend_kinds(&self) -> Vec<BackendKind> {
        let mut kinds = Vec::new();
        for entry in &self.entries {
            if !kinds.contains(&entry.backend_kind) {
                kinds.push(entry.backend_kind);
            }
        }
        kinds
    }

    pub fn requires_credential(&self) -> bool {
        self.entries.iter().any(|d| d.backend_kind.is_remote())
    }
}

impl<'a> IntoIterator for &'a ModelRegistry {
    type Item = &'a ModelDescriptor;
    type IntoIter = std::slice::Iter<'a, ModelDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

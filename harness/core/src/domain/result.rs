// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Result
//!
//! Shapes of the persisted comparison document.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** One PromptResult per prompt, one ResponseCell per model

use serde::{Deserialize, Serialize};

use super::llm::BackendError;

/// Normalized answer produced by an adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRecord {
    pub model_label: String,
    pub normalized_text: String,
}

impl ResponseRecord {
    pub fn new(model_label: impl Into<String>, normalized_text: impl Into<String>) -> Self {
        Self {
            model_label: model_label.into(),
            normalized_text: normalized_text.into(),
        }
    }
}

/// One (prompt, model) entry in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCell {
    pub model: String,

    #[serde(flatten)]
    pub outcome: CellOutcome,
}

/// Serialized as either a `response` or an `error` key next to `model`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellOutcome {
    Response(String),
    Error(CellFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFailure {
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    BackendUnavailable,
    MalformedResponse,
}

impl ResponseCell {
    pub fn failed(model: impl Into<String>, error: &BackendError) -> Self {
        let (kind, message) = match error {
            BackendError::Unavailable(msg) => (FailureKind::BackendUnavailable, msg.clone()),
            BackendError::MalformedResponse(msg) => (FailureKind::MalformedResponse, msg.clone()),
        };
        Self {
            model: model.into(),
            outcome: CellOutcome::Error(CellFailure { kind, message }),
        }
    }

    pub fn response(&self) -> Option<&str> {
        match &self.outcome {
            CellOutcome::Response(text) => Some(text),
            CellOutcome::Error(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, CellOutcome::Error(_))
    }
}

impl From<ResponseRecord> for ResponseCell {
    fn from(record: ResponseRecord) -> Self {
        Self {
            model: record.model_label,
            outcome: CellOutcome::Response(record.normalized_text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResult {
    pub prompt: String,
    pub responses: Vec<ResponseCell>,
}

impl PromptResult {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            responses: Vec::new(),
        }
    }
}

/// Whole run, in prompt input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunResult(pub Vec<PromptResult>);

impl RunResult {
    pub fn prompts(&self) -> &[PromptResult] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.0
            .iter()
            .flat_map(|p| p.responses.iter())
            .filter(|c| c.is_failure())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_cell_shape() {
        let cell: ResponseCell = ResponseRecord::new("X", "World").into();
        assert_eq!(
            serde_json::to_value(&cell).unwrap(),
            json!({"model": "X", "response": "World"})
        );
    }

    #[test]
    fn test_failure_cell_shape() {
        let cell = ResponseCell::failed("X", &BackendError::Unavailable("HTTP 503".into()));
        assert_eq!(
            serde_json::to_value(&cell).unwrap(),
            json!({
                "model": "X",
                "error": {"kind": "backend_unavailable", "message": "HTTP 503"}
            })
        );
        assert!(cell.is_failure());
        assert_eq!(cell.response(), None);
    }

    #[test]
    fn test_run_result_is_a_bare_array() {
        let mut prompt = PromptResult::new("Hello");
        prompt.responses.push(ResponseRecord::new("X", "World").into());
        prompt.responses.push(ResponseCell::failed(
            "Y",
            &BackendError::MalformedResponse("no choices".into()),
        ));
        let result = RunResult(vec![prompt]);

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["prompt"], "Hello");
        assert_eq!(value[0]["responses"][1]["error"]["kind"], "malformed_response");
        assert_eq!(result.failure_count(), 1);

        let parsed: RunResult = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, result);
    }
}

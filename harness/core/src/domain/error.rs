// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Run-level error taxonomy
//
// Everything except `Backend` is fatal and aborts the run before (or instead
// of) producing a document. `Backend` errors are isolated per cell by the
// run orchestrator.

use super::llm::BackendError;
use super::model::BackendKind;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown model: '{0}'")]
    UnknownModel(String),

    #[error("Duplicate model label: '{0}'")]
    DuplicateModel(String),

    #[error("No adapter registered for backend kind '{0}'")]
    UnknownBackendKind(BackendKind),

    #[error("Run has already been started")]
    RunAlreadyStarted,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl BenchError {
    /// Unwrap a cell-level backend error; any other error is handed back
    /// unchanged so the caller can abort with it.
    pub fn into_backend_error(self) -> Result<BackendError, BenchError> {
        match self {
            BenchError::Backend(e) => Ok(e),
            fatal => Err(fatal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_backend_errors_are_isolated() {
        let down = BackendError::Unavailable("down".into());
        assert_eq!(
            BenchError::Backend(down.clone()).into_backend_error().unwrap(),
            down
        );
        assert!(matches!(
            BenchError::Configuration("missing key".into()).into_backend_error(),
            Err(BenchError::Configuration(_))
        ));
        assert!(matches!(
            BenchError::UnknownModel("GPT-9".into()).into_backend_error(),
            Err(BenchError::UnknownModel(_))
        ));
        assert!(matches!(
            BenchError::UnknownBackendKind(BackendKind::ReasoningChat).into_backend_error(),
            Err(BenchError::UnknownBackendKind(BackendKind::ReasoningChat))
        ));
    }

    #[test]
    fn test_unknown_backend_kind_message_names_kind() {
        let err = BenchError::UnknownBackendKind(BackendKind::LocalPipeline);
        assert_eq!(err.to_string(), "No adapter registered for backend kind 'local-pipeline'");
    }
}

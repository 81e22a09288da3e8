// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Run Orchestrator
//
// Prompt-major, model-minor, one backend call in flight at a time. This is
// the only place failure policy is decided: backend errors become error
// cells, every other error aborts the run.

use tracing::{info, warn};

use crate::application::dispatcher::Dispatcher;
use crate::domain::error::BenchError;
use crate::domain::model::ModelRegistry;
use crate::domain::result::{PromptResult, ResponseCell, RunResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
}

pub struct RunOrchestrator {
    dispatcher: Dispatcher,
    state: RunState,
}

impl RunOrchestrator {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run every prompt against every registry entry
    ///
    /// An orchestrator runs once. A fatal error leaves it in `Running`; the
    /// partially built result is dropped.
    pub async fn run<S: AsRef<str>>(
        &mut self,
        prompts: &[S],
        registry: &ModelRegistry,
    ) -> Result<RunResult, BenchError> {
        if self.state != RunState::NotStarted {
            return Err(BenchError::RunAlreadyStarted);
        }

        // Unroutable descriptors abort before any backend traffic
        for kind in registry.backend_kinds() {
            if !self.dispatcher.supports(kind) {
                return Err(BenchError::UnknownBackendKind(kind));
            }
        }

        self.state = RunState::Running;
        info!(
            prompts = prompts.len(),
            models = registry.len(),
            "Starting benchmark run"
        );

        let mut results = Vec::with_capacity(prompts.len());
        for (index, prompt) in prompts.iter().enumerate() {
            let prompt = prompt.as_ref();
            let mut prompt_result = PromptResult::new(prompt);

            for descriptor in registry {
                info!("Running {} (prompt {}/{})...", descriptor.label, index + 1, prompts.len());

                let cell = match self.dispatcher.dispatch(descriptor, prompt).await {
                    Ok(record) => ResponseCell::from(record),
                    Err(e) => {
                        let e = e.into_backend_error()?;
                        warn!(model = %descriptor.label, error = %e, "Backend call failed, recording error");
                        ResponseCell::failed(descriptor.label.clone(), &e)
                    }
                };
                prompt_result.responses.push(cell);
            }

            results.push(prompt_result);
        }

        self.state = RunState::Completed;
        let result = RunResult(results);
        info!(failures = result.failure_count(), "Benchmark run completed");
        Ok(result)
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod dispatcher;
pub mod run;

// Re-export use cases for convenience
pub use dispatcher::Dispatcher;
pub use run::{RunOrchestrator, RunState};

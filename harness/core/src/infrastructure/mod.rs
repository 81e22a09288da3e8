// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod credentials;
pub mod llm;
pub mod prompt_corpus;
pub mod report_writer;

pub use credentials::ApiCredential;
pub use report_writer::{FileSink, ResultSink};

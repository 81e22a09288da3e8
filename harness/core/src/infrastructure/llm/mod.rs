// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Backend Adapter Infrastructure - Anti-Corruption Layer Implementations
//
// Each adapter translates between the domain BackendAdapter interface and
// one external invocation protocol.

pub mod chat;
pub mod completion;
mod http;
pub mod local_pipeline;
pub mod openai;
pub mod registry;

pub use chat::{ChatCompletionAdapter, ReasoningChatAdapter};
pub use completion::LegacyCompletionAdapter;
pub use local_pipeline::{
    HuggingFacePipelineLoader, LocalPipelineAdapter, PipelineCache, PipelineLoader,
    TextGenerationPipeline,
};
pub use openai::OpenAIClient;
pub use registry::build_dispatcher;

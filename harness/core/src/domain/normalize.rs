// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Prompt rendering and answer normalization
//
// Backends without an instruction-tuned chat mode get the prompt wrapped in
// an assistant-conversation frame. Local pipelines echo that frame back, so
// it is stripped by exact prefix match before trimming.

/// Wrap a raw prompt in the assistant-conversation frame
pub fn render_assistant_prompt(prompt: &str) -> String {
    format!(
        "This is a conversation between a user and a helpful AI assistant. User: {}\nAssistant:",
        prompt
    )
}

/// Trim surrounding whitespace from a backend answer
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_string()
}

/// Remove an echoed `wrapper` from the start of `generated`, then trim
///
/// Only an exact prefix is removed. Any other text, including a partial or
/// whitespace-altered echo, is left in place and only trimmed.
pub fn strip_echoed_prompt(generated: &str, wrapper: &str) -> String {
    normalize_answer(generated.strip_prefix(wrapper).unwrap_or(generated))
}

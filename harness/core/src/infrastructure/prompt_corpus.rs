// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Prompt corpus loading
//
// The corpus is a YAML (or JSON) sequence of strings. Order is preserved and
// prompts are passed through untouched.

use anyhow::Context;
use std::path::Path;

pub fn load_prompts(path: impl AsRef<Path>) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read prompt corpus at {:?}", path))?;
    parse_prompts(&content).with_context(|| format!("Invalid prompt corpus at {:?}", path))
}

pub fn parse_prompts(content: &str) -> anyhow::Result<Vec<String>> {
    let prompts: Vec<String> = serde_yaml::from_str(content)?;
    if prompts.is_empty() {
        tracing::warn!("Prompt corpus is empty");
    }
    Ok(prompts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_yaml_corpus_keeps_order_and_text() {
        let yaml = r#"
- "Explain why 'time flies like an arrow but fruit flies like a banana' is funny."
- |
  Write a paragraph about cats.

  Then explain the style.
- Hello
"#;
        let prompts = parse_prompts(yaml).unwrap();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].starts_with("Explain why"));
        assert_eq!(prompts[1], "Write a paragraph about cats.\n\nThen explain the style.\n");
        assert_eq!(prompts[2], "Hello");
    }

    #[test]
    fn test_json_corpus() {
        let prompts = parse_prompts(r#"["Hello", "  padded  "]"#).unwrap();
        assert_eq!(prompts, vec!["Hello", "  padded  "]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- one\n- two").unwrap();
        assert_eq!(load_prompts(file.path()).unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn test_non_list_rejected() {
        assert!(parse_prompts("prompt: Hello").is_err());
        assert!(load_prompts("/nonexistent/prompts.yaml").is_err());
    }
}

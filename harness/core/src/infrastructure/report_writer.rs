// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Result serialization and persistence
//
// Pretty-printed JSON with two-space indentation and a trailing newline so
// documents from successive runs diff cleanly.

use anyhow::Context;
use std::path::{Path, PathBuf};

use crate::domain::result::RunResult;

/// Serialize a run into the persisted document format
pub fn serialize(result: &RunResult) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = serde_json::to_vec_pretty(result)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Destination for a serialized document
pub trait ResultSink {
    fn write(&self, bytes: &[u8]) -> anyhow::Result<()>;
}

pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for FileSink {
    fn write(&self, bytes: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        std::fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write results to {:?}", self.path))?;
        tracing::info!("Results saved to {}", self.path.display());
        Ok(())
    }
}

/// Serialize `result` and hand it to `sink`
pub fn write_report(result: &RunResult, sink: &dyn ResultSink) -> anyhow::Result<()> {
    let bytes = serialize(result).context("Failed to serialize run result")?;
    sink.write(&bytes)
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Benchmark run command
//!
//! Order matters: configuration and credentials are checked before the
//! prompt corpus is read or any backend is contacted, and nothing is written
//! unless the whole run completes.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use promptbench_core::application::RunOrchestrator;
use promptbench_core::domain::bench_config::BenchConfigManifest;
use promptbench_core::infrastructure::llm::build_dispatcher;
use promptbench_core::infrastructure::prompt_corpus::load_prompts;
use promptbench_core::infrastructure::report_writer::write_report;
use promptbench_core::infrastructure::FileSink;

#[derive(Args, Debug, Default)]
pub struct RunCommand {
    /// Prompt corpus (YAML or JSON list of strings)
    #[arg(short, long, value_name = "FILE", env = "PROMPTBENCH_PROMPTS")]
    pub prompts: Option<PathBuf>,

    /// Output document path (default: spec.output.path)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only run the given model label (repeatable)
    #[arg(short, long = "model", value_name = "LABEL")]
    pub models: Vec<String>,

    /// Token budget override for every backend
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,
}

pub async fn execute(command: RunCommand, config_override: Option<PathBuf>) -> Result<()> {
    let mut config = BenchConfigManifest::load_or_default(config_override)
        .context("Failed to load configuration")?;
    if let Some(max_tokens) = command.max_tokens {
        config.spec.generation.max_tokens = Some(max_tokens);
    }
    config
        .validate()
        .context("Configuration validation failed")?;

    let mut registry = config.spec.model_registry()?;
    if !command.models.is_empty() {
        registry = registry.select(&command.models)?;
    }
    if registry.is_empty() {
        anyhow::bail!("No models enabled. Enable at least one entry in spec.models.");
    }

    let dispatcher = build_dispatcher(&config.spec, &registry)?;

    let prompts_path = command
        .prompts
        .or_else(|| config.spec.prompts_file.clone())
        .context("No prompt corpus given. Pass --prompts FILE or set spec.prompts_file.")?;
    let prompts = load_prompts(&prompts_path)?;
    let output = command
        .output
        .unwrap_or_else(|| config.spec.output.path.clone());

    println!(
        "{}",
        format!(
            "Benchmarking {} prompt(s) against {} model(s)",
            prompts.len(),
            registry.len()
        )
        .bold()
    );
    info!(corpus = %prompts_path.display(), output = %output.display(), "Run configured");

    let result = RunOrchestrator::new(dispatcher)
        .run(&prompts, &registry)
        .await?;

    let sink = FileSink::new(output);
    write_report(&result, &sink)?;

    println!(
        "{}",
        format!("✓ Results saved to {}", sink.path().display()).green()
    );

    let failures = result.failure_count();
    if failures > 0 {
        println!(
            "{}",
            format!("⚠ {} response(s) failed; see the \"error\" entries in the document", failures).yellow()
        );
    }

    Ok(())
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use promptbench_core::domain::bench_config::BenchConfigManifest;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path
        #[arg(short, long, default_value = "./promptbench.yaml")]
        output: PathBuf,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate { output } => generate(output).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = BenchConfigManifest::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. PROMPTBENCH_CONFIG_PATH: {}",
            std::env::var("PROMPTBENCH_CONFIG_PATH")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./promptbench.yaml");
        println!("  4. ~/.promptbench/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!("  Name: {}", config.metadata.name);
    println!();

    println!("{}", "Remote API:".bold());
    println!("  Endpoint: {}", config.spec.openai.endpoint);
    // Only the reference is shown, never a resolved secret
    match config.spec.openai.api_key.as_deref() {
        Some(key) if key.starts_with("env:") => println!("  API key: {}", key),
        Some(_) => println!("  API key: {}", "(literal, hidden)".dimmed()),
        None => println!("  API key: {}", "(none)".dimmed()),
    }
    if let Some(timeout) = config.spec.openai.request_timeout_secs {
        println!("  Request timeout: {}s", timeout);
    }
    println!();

    println!("{}", "Local pipeline:".bold());
    println!("  Endpoint: {}", config.spec.local_pipeline.endpoint);
    println!();

    println!("{}", "Models:".bold());
    for model in &config.spec.models {
        let state = if model.enabled { "" } else { " (disabled)" };
        println!("  - {} → {} [{}]{}", model.label, model.model, model.backend, state);
    }
    println!();

    println!("{}", "Run:".bold());
    println!(
        "  Token budget override: {}",
        config
            .spec
            .generation
            .max_tokens
            .map(|n| n.to_string())
            .unwrap_or_else(|| "(per backend default)".to_string())
    );
    println!(
        "  Prompts file: {}",
        config
            .spec
            .prompts_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("  Output: {}", config.spec.output.path.display());

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = BenchConfigManifest::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

async fn generate(output: PathBuf) -> Result<()> {
    if output.exists() {
        anyhow::bail!("Refusing to overwrite existing file {:?}", output);
    }

    BenchConfigManifest::default()
        .to_yaml_file(&output)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}

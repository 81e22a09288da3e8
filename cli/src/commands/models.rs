// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Model registry listing

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use promptbench_core::domain::bench_config::BenchConfigManifest;

#[derive(Args, Debug, Default)]
pub struct ModelsCommand {
    /// Include disabled entries
    #[arg(long)]
    pub all: bool,
}

pub async fn execute(command: ModelsCommand, config_override: Option<PathBuf>) -> Result<()> {
    let config = BenchConfigManifest::load_or_default(config_override)
        .context("Failed to load configuration")?;
    let override_tokens = config.spec.generation.max_tokens;

    println!("{}", "Models (output order):".bold());
    for entry in &config.spec.models {
        if !entry.enabled && !command.all {
            continue;
        }
        let budget = override_tokens.unwrap_or_else(|| entry.backend.default_max_tokens());
        let line = format!(
            "  {} → {} [{}], {} tokens",
            entry.label.bold(),
            entry.model,
            entry.backend,
            budget
        );
        if entry.enabled {
            println!("{}", line);
        } else {
            println!("{} {}", line.dimmed(), "(disabled)".dimmed());
        }
    }

    Ok(())
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for promptbench CLI

pub mod config;
pub mod models;
pub mod run;

pub use self::config::ConfigCommand;
pub use self::models::ModelsCommand;
pub use self::run::RunCommand;

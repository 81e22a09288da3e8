// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Promptbench core
//!
//! Backend dispatch and response normalization for benchmarking a fixed
//! prompt corpus against local and remote text-generation backends.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Registry, adapters, dispatcher and run orchestration

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;

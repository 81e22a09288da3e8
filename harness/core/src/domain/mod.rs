// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Descriptors, adapter contract, normalization rules and result shapes.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure types shared by the application and infrastructure layers

pub mod bench_config;
pub mod error;
pub mod llm;
pub mod model;
pub mod normalize;
pub mod result;

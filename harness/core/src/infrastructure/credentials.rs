// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// API credential resolution
//
// Config values use the "env:VAR_NAME" form to reference the environment;
// any other value is taken literally.

use std::fmt;

use crate::domain::error::BenchError;

/// Secret bearer token for the remote API; never printed
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}

/// Resolve an API key reference from config
///
/// Returns `Ok(None)` when no key is configured. A referenced environment
/// variable that is unset or empty is a configuration error.
pub fn resolve_api_key(key: &Option<String>) -> Result<Option<ApiCredential>, BenchError> {
    match key {
        Some(k) => match k.strip_prefix("env:") {
            Some(var_name) => match std::env::var(var_name) {
                Ok(value) if !value.trim().is_empty() => Ok(Some(ApiCredential::new(value))),
                _ => Err(BenchError::Configuration(format!(
                    "API key is required. Set the {} environment variable.",
                    var_name
                ))),
            },
            None if k.is_empty() => Ok(None),
            None => Ok(Some(ApiCredential::new(k.clone()))),
        },
        None => Ok(None),
    }
}

/// Credential required by remote adapters; fails fast when absent
pub fn require_api_key(key: &Option<String>) -> Result<ApiCredential, BenchError> {
    resolve_api_key(key)?.ok_or_else(|| {
        BenchError::Configuration("API key is required but none is configured.".to_string())
    })
}

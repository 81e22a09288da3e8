// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Shared JSON-over-HTTP plumbing for backend adapters
//
// Transport failures and non-success statuses map to `Unavailable`; a body
// that does not deserialize into the expected envelope maps to
// `MalformedResponse`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::error::BenchError;
use crate::domain::llm::BackendError;

pub(crate) fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, BenchError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| BenchError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

pub(crate) async fn post_json<Req, Resp>(
    client: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
    body: &Req,
    model: &str,
) -> Result<Resp, BackendError>
where
    Req: Serialize + ?Sized,
    Resp: DeserializeOwned,
{
    debug!(url, model, "POST");

    let mut request = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(body);
    if let Some(token) = bearer {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            BackendError::Unavailable(format!("Request timed out: {}", e))
        } else {
            BackendError::Unavailable(format!("Network error: {}", e))
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();

        return Err(BackendError::Unavailable(if status == 401 || status == 403 {
            format!("Authentication failed (HTTP {}): {}", status.as_u16(), error_text)
        } else if status == 429 {
            format!("Rate limit exceeded: {}", error_text)
        } else if status == 404 {
            format!("Model not found: {}", model)
        } else {
            format!("HTTP {}: {}", status.as_u16(), error_text)
        }));
    }

    let text = response
        .text()
        .await
        .map_err(|e| BackendError::Unavailable(format!("Failed to read response body: {}", e)))?;

    serde_json::from_str(&text)
        .map_err(|e| BackendError::MalformedResponse(format!("Failed to parse response: {}", e)))
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// OpenAI API Client
//
// Shared by the legacy completion, chat and reasoning chat adapters.
// Also works with OpenAI-compatible APIs (LM Studio, vLLM, etc.)

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::http::{build_client, post_json};
use crate::domain::error::BenchError;
use crate::domain::llm::BackendError;
use crate::infrastructure::credentials::ApiCredential;

pub struct OpenAIClient {
    client: reqwest::Client,
    endpoint: String,
    credential: ApiCredential,
}

impl OpenAIClient {
    pub fn new(
        endpoint: impl Into<String>,
        credential: ApiCredential,
        timeout: Option<Duration>,
    ) -> Result<Self, BenchError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
            credential,
        })
    }

    pub(crate) async fn post<Req, Resp>(
        &self,
        path: &str,
        body: &Req,
        model: &str,
    ) -> Result<Resp, BackendError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), path);
        post_json(&self.client, &url, Some(self.credential.expose()), body, model).await
    }
}

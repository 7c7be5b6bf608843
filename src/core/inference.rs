//! Inference collaborator backed by Cloudflare Workers AI
//!
//! Information Hiding:
//! - Endpoint layout and response envelope hidden behind the `Inference` trait
//! - Credentials are supplied per call, never stored by the client

use crate::config::{CloudflareCredentials, Settings};
use crate::core::cloudflare::{self, ApiMessage};
use crate::core::error::{ClientError, ClientResult};
use crate::core::llm::{ChatMessage, TextCompletion};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Inference capability: role-tagged messages in, one text field out
#[async_trait]
pub trait Inference: Send + Sync {
    async fn infer(
        &self,
        credentials: &CloudflareCredentials,
        messages: &[ChatMessage],
    ) -> ClientResult<String>;
}

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    #[serde(default)]
    success: bool,
    result: Option<RunResult>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    response: Option<String>,
}

pub struct WorkersAiClient {
    client: Client,
    api_base: String,
    model: String,
}

impl WorkersAiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: cloudflare::http_client(settings.http.timeout_secs),
            api_base: settings.cloudflare.api_base.trim_end_matches('/').to_string(),
            model: settings.cloudflare.inference_model.clone(),
        }
    }

    fn endpoint(&self, account_id: &str) -> String {
        format!("{}/accounts/{}/ai/run/{}", self.api_base, account_id, self.model)
    }
}

#[async_trait]
impl Inference for WorkersAiClient {
    async fn infer(
        &self,
        credentials: &CloudflareCredentials,
        messages: &[ChatMessage],
    ) -> ClientResult<String> {
        let url = self.endpoint(&credentials.account_id);
        tracing::debug!("[WorkersAi] POST {} ({} messages)", url, messages.len());

        let response: RunResponse = cloudflare::post_json(
            &self.client,
            &url,
            &credentials.api_token,
            &RunRequest { messages },
        )
        .await?;

        if !response.success {
            return Err(ClientError::Unsuccessful(cloudflare::describe(
                &response.errors,
            )));
        }

        response
            .result
            .and_then(|r| r.response)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ClientError::Parse("missing result.response".to_string()))
    }
}

/// Text completion served by an `Inference` backend with fixed credentials
pub struct WorkersAiCompletion {
    inference: Arc<dyn Inference>,
    credentials: CloudflareCredentials,
}

impl WorkersAiCompletion {
    pub fn new(inference: Arc<dyn Inference>, credentials: CloudflareCredentials) -> Self {
        Self {
            inference,
            credentials,
        }
    }
}

#[async_trait]
impl TextCompletion for WorkersAiCompletion {
    async fn complete(&self, prompt: &str) -> ClientResult<String> {
        self.inference
            .infer(&self.credentials, &[ChatMessage::user(prompt)])
            .await
    }
}

//! Plumbing shared by the Cloudflare REST clients

use crate::core::error::{ClientError, ClientResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

/// Entry of the `errors` / `messages` arrays in the Cloudflare envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

pub(crate) fn describe(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "no error details returned".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{} ({})", e.message, e.code))
        .collect::<Vec<_>>()
        .join("; ")
}

pub(crate) fn http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// POST `body` as JSON with a bearer token and decode a 2xx reply as `R`
pub(crate) async fn post_json<B, R>(
    client: &Client,
    url: &str,
    token: &str,
    body: &B,
) -> ClientResult<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = client.post(url).bearer_auth(token).json(body).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::warn!("[Cloudflare] {} returned {}: {}", url, status, body);
        return Err(ClientError::Api {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<R>()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

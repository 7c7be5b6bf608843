//! SQL-over-HTTP store backed by Cloudflare D1

use super::{Row, TabularStore};
use crate::config::{CloudflareCredentials, Settings};
use crate::core::cloudflare::{self, ApiMessage};
use crate::core::error::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    sql: &'a str,
    params: &'a [Value],
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    #[serde(default)]
    results: Vec<Row>,
}

pub struct D1Client {
    client: Client,
    api_base: String,
}

impl D1Client {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: cloudflare::http_client(settings.http.timeout_secs),
            api_base: settings.cloudflare.api_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, credentials: &CloudflareCredentials) -> String {
        format!(
            "{}/accounts/{}/d1/database/{}/query",
            self.api_base, credentials.account_id, credentials.database_id
        )
    }
}

#[async_trait]
impl TabularStore for D1Client {
    async fn query(
        &self,
        credentials: &CloudflareCredentials,
        sql: &str,
        params: &[Value],
    ) -> ClientResult<Vec<Row>> {
        let url = self.endpoint(credentials);
        tracing::debug!("[D1Client] {} ({} params)", sql, params.len());

        let response: QueryResponse = cloudflare::post_json(
            &self.client,
            &url,
            &credentials.api_token,
            &QueryRequest { sql, params },
        )
        .await?;

        if !response.success {
            return Err(ClientError::Unsuccessful(cloudflare::describe(
                &response.errors,
            )));
        }

        let statement = response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Parse("response has no statement result".to_string()))?;

        tracing::debug!("[D1Client] {} rows returned", statement.results.len());
        Ok(statement.results)
    }
}

//! Tabular store abstraction
//!
//! Information Hiding:
//! - Store backend hidden behind the `TabularStore` trait
//! - SQL text and row decoding kept inside `PodcastStore`
//! - Each backend owns its own wire format and envelope checks

use crate::config::CloudflareCredentials;
use crate::core::error::ClientResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod d1;
pub mod podcasts;

pub use d1::D1Client;
pub use podcasts::PodcastStore;

/// One result row as returned by the store
pub type Row = Map<String, Value>;

/// Stateless SQL endpoint: parameterized statement in, rows out
#[async_trait]
pub trait TabularStore: Send + Sync {
    async fn query(
        &self,
        credentials: &CloudflareCredentials,
        sql: &str,
        params: &[Value],
    ) -> ClientResult<Vec<Row>>;
}

/// A generated episode as persisted in the `podcasts` table.
///
/// Records are written once and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastRecord {
    pub topic: String,
    pub slug: String,
    pub url: String,
    pub created_at: String,
}

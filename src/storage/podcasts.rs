use super::{PodcastRecord, Row, TabularStore};
use crate::config::CloudflareCredentials;
use crate::core::error::{ClientError, ClientResult};
use serde_json::{json, Value};
use std::sync::Arc;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS podcasts (\
     topic TEXT NOT NULL, \
     slug TEXT NOT NULL, \
     url TEXT NOT NULL, \
     created_at TEXT NOT NULL)";

const INSERT: &str = "INSERT INTO podcasts (topic, slug, url, created_at) VALUES (?, ?, ?, ?)";

const SELECT_RECENT: &str = "SELECT topic, slug, url, created_at FROM podcasts \
     ORDER BY created_at DESC LIMIT ?";

const SELECT_MATCHING: &str = "SELECT topic, slug, url, created_at FROM podcasts \
     WHERE topic LIKE ? ORDER BY created_at DESC LIMIT ?";

/// Typed access to the `podcasts` table
#[derive(Clone)]
pub struct PodcastStore {
    backend: Arc<dyn TabularStore>,
}

impl PodcastStore {
    pub fn new(backend: Arc<dyn TabularStore>) -> Self {
        Self { backend }
    }

    pub async fn ensure_schema(&self, credentials: &CloudflareCredentials) -> ClientResult<()> {
        self.backend.query(credentials, CREATE_TABLE, &[]).await?;
        Ok(())
    }

    pub async fn insert(
        &self,
        credentials: &CloudflareCredentials,
        record: &PodcastRecord,
    ) -> ClientResult<()> {
        let params = [
            json!(record.topic),
            json!(record.slug),
            json!(record.url),
            json!(record.created_at),
        ];
        self.backend.query(credentials, INSERT, &params).await?;
        tracing::debug!("[PodcastStore] Stored '{}'", record.slug);
        Ok(())
    }

    /// Most recent records first
    pub async fn recent(
        &self,
        credentials: &CloudflareCredentials,
        limit: usize,
    ) -> ClientResult<Vec<PodcastRecord>> {
        let rows = self
            .backend
            .query(credentials, SELECT_RECENT, &[json!(limit)])
            .await?;
        decode(rows)
    }

    /// Records whose topic contains `term`; case rules are the store's
    pub async fn search(
        &self,
        credentials: &CloudflareCredentials,
        term: &str,
        limit: usize,
    ) -> ClientResult<Vec<PodcastRecord>> {
        let params = [json!(format!("%{}%", term)), json!(limit)];
        let rows = self
            .backend
            .query(credentials, SELECT_MATCHING, &params)
            .await?;
        decode(rows)
    }
}

fn decode(rows: Vec<Row>) -> ClientResult<Vec<PodcastRecord>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(Value::Object(row))
                .map_err(|e| ClientError::Parse(format!("malformed podcast row: {}", e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<(String, Vec<Value>)>>,
        rows: Vec<Row>,
    }

    #[async_trait]
    impl TabularStore for RecordingStore {
        async fn query(
            &self,
            _credentials: &CloudflareCredentials,
            sql: &str,
            params: &[Value],
        ) -> ClientResult<Vec<Row>> {
            self.calls
                .lock()
                .unwrap()
                .push((sql.to_string(), params.to_vec()));
            Ok(self.rows.clone())
        }
    }

    fn credentials() -> CloudflareCredentials {
        CloudflareCredentials {
            account_id: "a".to_string(),
            database_id: "d".to_string(),
            api_token: "t".to_string(),
        }
    }

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_binds_fields_in_column_order() {
        let backend = Arc::new(RecordingStore::default());
        let store = PodcastStore::new(backend.clone());
        let record = PodcastRecord {
            topic: "Jazz & blues".to_string(),
            slug: "jazz-blues-guide".to_string(),
            url: "https://x.dev/jazz-blues-guide".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        };

        store.insert(&credentials(), &record).await.unwrap();

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.starts_with("INSERT INTO podcasts"));
        assert_eq!(
            calls[0].1,
            vec![
                json!("Jazz & blues"),
                json!("jazz-blues-guide"),
                json!("https://x.dev/jazz-blues-guide"),
                json!("2026-01-01T00:00:00.000Z"),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_wraps_term_in_wildcards() {
        let backend = Arc::new(RecordingStore::default());
        let store = PodcastStore::new(backend.clone());

        store.search(&credentials(), "ai", 20).await.unwrap();

        let calls = backend.calls.lock().unwrap();
        assert!(calls[0].0.contains("WHERE topic LIKE ?"));
        assert_eq!(calls[0].1, vec![json!("%ai%"), json!(20)]);
    }

    #[tokio::test]
    async fn test_recent_decodes_rows() {
        let backend = Arc::new(RecordingStore {
            rows: vec![row(json!({
                "topic": "ai",
                "slug": "ai-guide",
                "url": "https://x.dev/ai-guide",
                "created_at": "2026-02-01T10:00:00.000Z"
            }))],
            ..Default::default()
        });
        let store = PodcastStore::new(backend.clone());

        let records = store.recent(&credentials(), 10).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slug, "ai-guide");
        assert!(backend.calls.lock().unwrap()[0].0.contains("ORDER BY created_at DESC"));
    }

    #[tokio::test]
    async fn test_malformed_row_is_a_parse_error() {
        let backend = Arc::new(RecordingStore {
            rows: vec![row(json!({"topic": "ai"}))],
            ..Default::default()
        });
        let store = PodcastStore::new(backend);

        assert!(matches!(
            store.recent(&credentials(), 10).await,
            Err(ClientError::Parse(_))
        ));
    }
}

//! Podcast agent: slug, announcement, catalog and recommendations
//!
//! Information Hiding:
//! - Collaborators injected as capability traits (completion, inference, store)
//! - Credential checks happen before any store or inference call
//! - Collaborator failures are converted to `Reply` values, never returned as errors

pub mod messages;
mod recommend;
mod reply;

pub use reply::{Generation, PersistOutcome, Reply};

use crate::config::{Credentials, PodcastConfig, Settings};
use crate::core::inference::{Inference, WorkersAiClient, WorkersAiCompletion};
use crate::core::llm::{ChatMessage, LLMClient, TextCompletion, UnavailableCompletion};
use crate::core::prompts::{ANNOUNCEMENT, EPISODE_ANNOUNCEMENT, RECOMMENDER_SYSTEM, SLUG_SUGGESTION};
use crate::core::slug::{clean_slug, compose_url, derive_slug};
use crate::storage::{D1Client, PodcastRecord, PodcastStore, TabularStore};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

/// What a mis-stringified model response cleans down to
const STRINGIFIED_PLACEHOLDER: &str = "objectpromise";

pub struct PodcastAgent {
    completion: Arc<dyn TextCompletion>,
    inference: Arc<dyn Inference>,
    store: PodcastStore,
    settings: PodcastConfig,
}

impl PodcastAgent {
    pub fn new(
        completion: Arc<dyn TextCompletion>,
        store: Arc<dyn TabularStore>,
        inference: Arc<dyn Inference>,
        settings: PodcastConfig,
    ) -> Self {
        Self {
            completion,
            inference,
            store: PodcastStore::new(store),
            settings,
        }
    }

    /// Wire the HTTP collaborators.
    ///
    /// Completion goes to OpenAI when `OPENAI_API_KEY` is set, otherwise to
    /// Workers AI if `credentials` are complete.
    pub fn from_settings(settings: &Settings, credentials: &Credentials) -> Self {
        let inference: Arc<dyn Inference> = Arc::new(WorkersAiClient::new(settings));

        let completion: Arc<dyn TextCompletion> = match Settings::api_key() {
            Ok(api_key) => Arc::new(LLMClient::new(api_key, settings.clone())),
            Err(_) => match credentials.resolve() {
                Some(resolved) => {
                    tracing::info!("OPENAI_API_KEY not set, using Workers AI for completions");
                    Arc::new(WorkersAiCompletion::new(inference.clone(), resolved))
                }
                None => {
                    tracing::warn!("No completion backend configured");
                    Arc::new(UnavailableCompletion)
                }
            },
        };

        Self::new(
            completion,
            Arc::new(D1Client::new(settings)),
            inference,
            settings.podcast.clone(),
        )
    }

    pub fn with_ai_slug(mut self, enabled: bool) -> Self {
        self.settings.ai_slug = enabled;
        self
    }

    /// Slug for `query` without any remote call
    pub fn slug(&self, query: &str) -> String {
        derive_slug(query)
    }

    /// Episode URL for `query` without any remote call
    pub fn url(&self, query: &str, base: Option<&str>) -> String {
        self.compose(base, &self.slug(query))
    }

    /// Slug for `query`, asking the completion model first when `ai_slug` is on.
    ///
    /// Model output is always re-sanitized; unusable output falls back to
    /// `derive_slug`.
    pub async fn slug_for(&self, query: &str) -> String {
        if !self.settings.ai_slug {
            return derive_slug(query);
        }

        let prompt = SLUG_SUGGESTION.render(&[("query", query)]);
        match self.completion.complete(&prompt).await {
            Ok(suggestion) => {
                let cleaned = clean_slug(&suggestion);
                if cleaned.is_empty() || cleaned.replace('-', "") == STRINGIFIED_PLACEHOLDER {
                    tracing::warn!("Discarding unusable slug suggestion {:?}", suggestion);
                    derive_slug(query)
                } else {
                    cleaned
                }
            }
            Err(e) => {
                tracing::warn!("Slug suggestion failed, deriving locally: {}", e);
                derive_slug(query)
            }
        }
    }

    /// Build the episode URL, ask for an announcement and record the episode.
    ///
    /// The store write is best effort: its outcome is reported in
    /// `Generation::persist` and never affects the announcement.
    pub async fn generate(
        &self,
        query: &str,
        base: Option<&str>,
        episode: Option<&str>,
        credentials: &Credentials,
    ) -> Generation {
        let slug = self.slug_for(query).await;
        let url = self.compose(base, &slug);

        let prompt = match episode {
            Some(episode) => EPISODE_ANNOUNCEMENT.render(&[
                ("query", query),
                ("url", &url),
                ("episode", episode),
            ]),
            None => ANNOUNCEMENT.render(&[("query", query), ("url", &url)]),
        };

        let announcement = match self.completion.complete(&prompt).await {
            Ok(text) => Reply::Answer(text),
            Err(e) => {
                tracing::warn!("Announcement generation failed: {}", e);
                Reply::degraded(messages::announcement_unavailable(&url), e)
            }
        };

        let persist = self.persist(query, &slug, &url, credentials).await;

        Generation {
            slug,
            url,
            announcement,
            persist,
        }
    }

    /// Most recent episodes, `limit` defaulting to the configured list size
    pub async fn list(&self, limit: Option<usize>, credentials: &Credentials) -> Reply {
        let Some(resolved) = credentials.resolve() else {
            return Reply::CredentialsRequired;
        };
        let limit = limit.unwrap_or(self.settings.list_limit);

        match self.store.recent(&resolved, limit).await {
            Ok(records) if records.is_empty() => Reply::NoResults(messages::NO_PODCASTS.to_string()),
            Ok(records) => Reply::Answer(reply::format_records("Recent podcasts", &records)),
            Err(e) => {
                tracing::warn!("Listing podcasts failed: {}", e);
                Reply::degraded(messages::LIST_FAILED, e)
            }
        }
    }

    pub async fn search(&self, term: &str, credentials: &Credentials) -> Reply {
        let Some(resolved) = credentials.resolve() else {
            return Reply::CredentialsRequired;
        };

        match self
            .store
            .search(&resolved, term, self.settings.search_limit)
            .await
        {
            Ok(records) if records.is_empty() => Reply::NoResults(messages::no_search_results(term)),
            Ok(records) => Reply::Answer(reply::format_records(
                &format!("Podcasts matching \"{}\"", term),
                &records,
            )),
            Err(e) => {
                tracing::warn!("Searching podcasts failed: {}", e);
                Reply::degraded(messages::SEARCH_FAILED, e)
            }
        }
    }

    /// Ask the inference model to pick episodes for `preference`, falling
    /// back to a local keyword match when it fails.
    pub async fn recommend(&self, preference: &str, credentials: &Credentials) -> Reply {
        let Some(resolved) = credentials.resolve() else {
            return Reply::CredentialsRequired;
        };

        let records = match self
            .store
            .recent(&resolved, self.settings.recommend_pool)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Loading recommendation pool failed: {}", e);
                return Reply::degraded(messages::RECOMMEND_FAILED, e);
            }
        };

        if records.is_empty() {
            return Reply::NoResults(messages::NO_PODCASTS.to_string());
        }

        let request = [
            ChatMessage::system(RECOMMENDER_SYSTEM),
            ChatMessage::user(recommend::catalog_prompt(preference, &records)),
        ];

        match self.inference.infer(&resolved, &request).await {
            Ok(text) => Reply::Answer(format!(
                "Recommended for \"{}\":\n\n{}",
                preference,
                text.trim()
            )),
            Err(e) => {
                tracing::warn!("Inference failed, using keyword match: {}", e);
                match recommend::keyword_match(preference, &records) {
                    Some(record) => Reply::Answer(format!(
                        "Recommended for \"{}\":\n\n{}",
                        preference,
                        reply::format_record(record)
                    )),
                    None => Reply::NoResults(messages::no_recommendation(preference)),
                }
            }
        }
    }

    /// Create the `podcasts` table if it does not exist
    pub async fn init_schema(&self, credentials: &Credentials) -> Reply {
        let Some(resolved) = credentials.resolve() else {
            return Reply::CredentialsRequired;
        };

        match self.store.ensure_schema(&resolved).await {
            Ok(()) => Reply::Answer(messages::SCHEMA_READY.to_string()),
            Err(e) => {
                tracing::warn!("Creating podcast table failed: {}", e);
                Reply::degraded(messages::SCHEMA_FAILED, e)
            }
        }
    }

    fn compose(&self, base: Option<&str>, slug: &str) -> String {
        compose_url(base.or(Some(self.settings.base_url.as_str())), slug)
    }

    async fn persist(
        &self,
        query: &str,
        slug: &str,
        url: &str,
        credentials: &Credentials,
    ) -> PersistOutcome {
        let Some(resolved) = credentials.resolve() else {
            tracing::debug!("No store credentials, episode not recorded");
            return PersistOutcome::SkippedNoCredentials;
        };

        let record = PodcastRecord {
            topic: query.to_string(),
            slug: slug.to_string(),
            url: url.to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        match self.store.insert(&resolved, &record).await {
            Ok(()) => PersistOutcome::Persisted,
            Err(e) => {
                tracing::warn!("Recording episode '{}' failed: {}", slug, e);
                PersistOutcome::Failed(e.to_string())
            }
        }
    }
}

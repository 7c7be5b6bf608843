use super::messages;
use crate::storage::PodcastRecord;
use std::fmt;

/// Outcome of an agent operation.
///
/// Every variant renders to user-facing text; failures of collaborators
/// surface here instead of as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    /// The query ran but matched nothing
    NoResults(String),
    /// Store credentials were missing; nothing was sent
    CredentialsRequired,
    /// A collaborator failed and the call fell back to `message`
    Degraded { message: String, cause: String },
}

impl Reply {
    pub(crate) fn degraded(message: impl Into<String>, cause: impl fmt::Display) -> Self {
        Reply::Degraded {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Answer(_) | Reply::NoResults(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Reply::Answer(text) | Reply::NoResults(text) => text,
            Reply::CredentialsRequired => messages::CREDENTIALS_REQUIRED,
            Reply::Degraded { message, .. } => message,
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// What happened to the best-effort write made by `generate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Persisted,
    SkippedNoCredentials,
    Failed(String),
}

/// Result of `PodcastAgent::generate`
#[derive(Debug, Clone)]
pub struct Generation {
    pub slug: String,
    pub url: String,
    pub announcement: Reply,
    pub persist: PersistOutcome,
}

pub(crate) fn format_records(heading: &str, records: &[PodcastRecord]) -> String {
    let mut out = format!("{} ({}):\n", heading, records.len());
    for (i, record) in records.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{}. {}\n", i + 1, format_record(record)));
    }
    out
}

pub(crate) fn format_record(record: &PodcastRecord) -> String {
    format!(
        "{}\n   {}\n   created {}",
        record.topic, record.url, record.created_at
    )
}

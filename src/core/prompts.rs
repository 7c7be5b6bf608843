//! Prompt templates with named `{placeholder}` substitution

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

pub const ANNOUNCEMENT: PromptTemplate = PromptTemplate::new(
    "You are the host of an upbeat podcast network. Write a short announcement \
     for a new podcast episode about \"{query}\". Invite listeners to tune in at \
     {url} and include that link exactly as written. Keep it under 120 words.",
);

pub const EPISODE_ANNOUNCEMENT: PromptTemplate = PromptTemplate::new(
    "You are the host of an upbeat podcast network. Write a short announcement \
     for {episode} of our podcast about \"{query}\". Invite listeners to tune in \
     at {url} and include that link exactly as written. Keep it under 120 words.",
);

pub const SLUG_SUGGESTION: PromptTemplate = PromptTemplate::new(
    "Suggest a short URL slug (at most five lowercase words joined by hyphens) \
     for a podcast episode about \"{query}\". Reply with the slug only.",
);

pub const RECOMMENDATION_REQUEST: PromptTemplate = PromptTemplate::new(
    "Listener preference: {preference}\n\nCatalog:\n{catalog}",
);

pub const RECOMMENDER_SYSTEM: &str =
    "You recommend podcast episodes. Given a listener preference and a numbered \
     catalog, pick the best matching episodes, explain each choice in one sentence \
     and always include the episode URL. Only recommend episodes from the catalog.";

/// A prompt with `{name}` placeholders.
///
/// Placeholders without a matching variable are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    text: &'static str,
}

impl PromptTemplate {
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        PLACEHOLDER
            .replace_all(self.text, |caps: &Captures| {
                let name = &caps[1];
                vars.iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

//! Fixed user-facing texts

pub const CREDENTIALS_REQUIRED: &str = "Database credentials required: provide a Cloudflare \
     account ID, database ID and API token.";

pub const NO_PODCASTS: &str = "No podcasts found yet. Generate one first!";

pub const LIST_FAILED: &str = "Unable to retrieve podcasts right now. Please try again later.";

pub const SEARCH_FAILED: &str = "Unable to search podcasts right now. Please try again later.";

pub const RECOMMEND_FAILED: &str =
    "Unable to load podcasts for recommendations right now. Please try again later.";

pub const SCHEMA_READY: &str = "Podcast table is ready.";

pub const SCHEMA_FAILED: &str = "Unable to create the podcast table.";

pub fn no_search_results(term: &str) -> String {
    format!("No podcasts found matching \"{}\".", term)
}

pub fn no_recommendation(preference: &str) -> String {
    format!("No podcast matches \"{}\" yet.", preference)
}

pub fn announcement_unavailable(url: &str) -> String {
    format!(
        "Could not write an announcement right now. Your episode link: {}",
        url
    )
}

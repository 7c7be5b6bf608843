//! Slug composition
//!
//! Turns free-form user text into a bounded, URL-safe path segment and
//! joins it onto a base URL.
//!
//! Information Hiding:
//! - Sanitization regexes compiled once and kept private
//! - Descriptor selection takes an injected randomness source

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

/// Redirect endpoint used when no base URL is supplied
pub const DEFAULT_BASE_URL: &str = "https://go.podcastagent.fm";

/// Hard upper bound on slug length, in characters
pub const MAX_SLUG_LEN: usize = 50;

/// Number of query words kept in the slug prefix
const MAX_WORDS: usize = 3;

/// Suffixes appended to every derived slug
pub const DESCRIPTORS: [&str; 8] = [
    "deep-dive",
    "explained",
    "guide",
    "insights",
    "stories",
    "journey",
    "exploration",
    "breakdown",
];

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]+").unwrap());

/// Derive a slug using the thread-local random source for the descriptor.
///
/// Identical input may produce different slugs across calls.
pub fn derive_slug(input: &str) -> String {
    derive_slug_with(input, &mut rand::rng())
}

/// Derive a slug, drawing the descriptor from `rng`.
///
/// The prefix is cut down before the descriptor is appended so the result
/// never exceeds [`MAX_SLUG_LEN`] and always ends with a whole descriptor.
pub fn derive_slug_with<R: Rng + ?Sized>(input: &str, rng: &mut R) -> String {
    let lowered = input.trim().to_lowercase();
    let prefix = lowered
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .take(MAX_WORDS)
        .collect::<Vec<_>>()
        .join("-");

    let descriptor = DESCRIPTORS[rng.random_range(0..DESCRIPTORS.len())];
    let budget = MAX_SLUG_LEN - descriptor.len() - 1;

    let cleaned = sanitize(&prefix);
    let prefix = truncate(&cleaned, budget);

    if prefix.is_empty() {
        descriptor.to_string()
    } else {
        format!("{}-{}", prefix, descriptor)
    }
}

/// Re-sanitize text that claims to be a slug (typically model output).
///
/// Returns an empty string when nothing usable survives.
pub fn clean_slug(text: &str) -> String {
    let cleaned = sanitize(&text.to_lowercase());
    truncate(&cleaned, MAX_SLUG_LEN).to_string()
}

/// Join `slug` onto `base`, falling back to [`DEFAULT_BASE_URL`].
///
/// Exactly one trailing slash is dropped from the base. The base is not
/// validated.
pub fn compose_url(base: Option<&str>, slug: &str) -> String {
    let base = base.filter(|b| !b.is_empty()).unwrap_or(DEFAULT_BASE_URL);
    let base = base.strip_suffix('/').unwrap_or(base);
    format!("{}/{}", base, slug)
}

fn sanitize(text: &str) -> String {
    let stripped = DISALLOWED.replace_all(text, "");
    let collapsed = SEPARATORS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

fn truncate(slug: &str, max_chars: usize) -> &str {
    let end = slug
        .char_indices()
        .nth(max_chars)
        .map_or(slug.len(), |(idx, _)| idx);
    slug[..end].trim_end_matches('-')
}

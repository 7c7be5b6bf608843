use crate::core::prompts::RECOMMENDATION_REQUEST;
use crate::storage::PodcastRecord;

/// Numbered catalog plus the preference, ready for the inference model
pub(crate) fn catalog_prompt(preference: &str, records: &[PodcastRecord]) -> String {
    let catalog = records
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} - {}", i + 1, r.topic, r.url))
        .collect::<Vec<_>>()
        .join("\n");

    RECOMMENDATION_REQUEST.render(&[("preference", preference), ("catalog", &catalog)])
}

/// First record whose topic contains any word of the preference.
///
/// Records are expected most recent first. Single-character words are ignored.
pub(crate) fn keyword_match<'a>(
    preference: &str,
    records: &'a [PodcastRecord],
) -> Option<&'a PodcastRecord> {
    let words: Vec<String> = preference
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| w.chars().count() > 1)
        .collect();

    if words.is_empty() {
        return None;
    }

    records.iter().find(|record| {
        let topic = record.topic.to_lowercase();
        words.iter().any(|word| topic.contains(word.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(topic: &str) -> PodcastRecord {
        PodcastRecord {
            topic: topic.to_string(),
            slug: format!("{}-guide", topic),
            url: format!("https://x.dev/{}-guide", topic),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_keyword_match_finds_topic_word() {
        let records = vec![record("cooking"), record("ai")];
        let found = keyword_match("something about ai", &records).unwrap();
        assert_eq!(found.topic, "ai");
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_and_ignores_punctuation() {
        let records = vec![record("Deep Sea Creatures")];
        assert!(keyword_match("Tell me about the SEA!", &records).is_some());
    }

    #[test]
    fn test_keyword_match_prefers_earlier_records() {
        let records = vec![record("jazz history"), record("jazz today")];
        assert_eq!(keyword_match("jazz", &records).unwrap().topic, "jazz history");
    }

    #[test]
    fn test_keyword_match_none() {
        let records = vec![record("cooking")];
        assert!(keyword_match("astronomy", &records).is_none());
        assert!(keyword_match("a", &records).is_none());
        assert!(keyword_match("", &records).is_none());
    }

    #[test]
    fn test_catalog_prompt_lists_every_record() {
        let prompt = catalog_prompt("space", &[record("mars"), record("moon")]);
        assert!(prompt.starts_with("Listener preference: space"));
        assert!(prompt.contains("1. mars - https://x.dev/mars-guide"));
        assert!(prompt.contains("2. moon - https://x.dev/moon-guide"));
    }
}

//! Technology tag extraction.
//!
//! Matching is case-insensitive substring containment, not word matching:
//! short terms such as `Go`, `AI` or `TLS` also match inside longer words
//! ("Google", "maintain", "settlers"). This keeps tag counts comparable with
//! earlier reports and is an accepted source of false positives.

use tracing::trace;

/// Extracts canonical tech tags from free text using a fixed vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTagger {
    vocabulary: &'static [&'static str],
}

impl KeywordTagger {
    pub fn new(vocabulary: &'static [&'static str]) -> Self {
        Self { vocabulary }
    }

    /// Returns every vocabulary term contained in `text`, in vocabulary order,
    /// with the vocabulary's casing.
    pub fn tag(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        let tags: Vec<String> = self
            .vocabulary
            .iter()
            .filter(|term| haystack.contains(&term.to_lowercase()))
            .map(|term| term.to_string())
            .collect();
        trace!(count = tags.len(), "Tagged text");
        tags
    }
}

impl Default for KeywordTagger {
    fn default() -> Self {
        Self::new(super::vocabulary::TECH_TAGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &[&str] = &["Rust", "Kubernetes", "Go", "CI/CD"];

    #[test]
    fn test_tags_in_vocabulary_order_with_vocabulary_casing() {
        let tagger = KeywordTagger::new(SMALL);
        let tags = tagger.tag("kubernetes operators written in RUST");
        assert_eq!(tags, vec!["Rust", "Kubernetes"]);
    }

    #[test]
    fn test_no_duplicates_for_repeated_mentions() {
        let tagger = KeywordTagger::new(SMALL);
        let tags = tagger.tag("Rust, rust and more rust");
        assert_eq!(tags, vec!["Rust"]);
    }

    #[test]
    fn test_substring_semantics_match_inside_words() {
        let tagger = KeywordTagger::new(SMALL);
        // "Go" is found inside "Google"; this is the documented behaviour.
        assert_eq!(tagger.tag("Google announces new phone"), vec!["Go"]);
    }

    #[test]
    fn test_punctuated_terms() {
        let tagger = KeywordTagger::new(SMALL);
        assert_eq!(tagger.tag("Faster ci/cd pipelines"), vec!["CI/CD"]);
    }

    #[test]
    fn test_empty_text_has_no_tags() {
        let tagger = KeywordTagger::new(SMALL);
        assert!(tagger.tag("").is_empty());
    }

    #[test]
    fn test_default_vocabulary() {
        let tagger = KeywordTagger::default();
        let tags = tagger.tag("Deploying LLM agents on Kubernetes with Docker");
        assert!(tags.contains(&"LLM".to_string()));
        assert!(tags.contains(&"Kubernetes".to_string()));
        assert!(tags.contains(&"Docker".to_string()));
        assert!(!tags.contains(&"Azure".to_string()));
    }
}

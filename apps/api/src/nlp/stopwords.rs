//! Stopword filtering backed by the `stop-words` crate.
//!
//! The list is loaded once at startup and shared read-only through `AppState`.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// A filter for removing stopwords from text. Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
    language: &'static str,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl StopwordFilter {
    /// Loads the list for `language`. Unknown languages fall back to English.
    pub fn new(language: &str) -> Self {
        let (lang, code) = match language.trim().to_lowercase().as_str() {
            "de" | "german" => (LANGUAGE::German, "de"),
            "fr" | "french" => (LANGUAGE::French, "fr"),
            "es" | "spanish" => (LANGUAGE::Spanish, "es"),
            "it" | "italian" => (LANGUAGE::Italian, "it"),
            "pt" | "portuguese" => (LANGUAGE::Portuguese, "pt"),
            "nl" | "dutch" => (LANGUAGE::Dutch, "nl"),
            _ => (LANGUAGE::English, "en"),
        };

        Self {
            stopwords: get(lang).iter().map(|s| s.to_lowercase()).collect(),
            language: code,
        }
    }

    /// Create a stopword filter from a custom list
    #[cfg(test)]
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
            language: "custom",
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::new("en");

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The"));
        assert!(filter.is_stopword("and"));
        assert!(!filter.is_stopword("python"));
        assert!(!filter.is_stopword("kubernetes"));
        assert_eq!(filter.language(), "en");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let filter = StopwordFilter::new("klingon");
        assert_eq!(filter.language(), "en");
        assert!(filter.is_stopword("the"));
    }

    #[test]
    fn test_custom_list() {
        let filter = StopwordFilter::from_list(&["Foo", "bar"]);
        assert!(filter.is_stopword("foo"));
        assert!(filter.is_stopword("BAR"));
        assert!(!filter.is_stopword("the"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_empty_list() {
        let filter = StopwordFilter::from_list(&[]);
        assert!(filter.is_empty());
        assert!(!filter.is_stopword("the"));
    }
}

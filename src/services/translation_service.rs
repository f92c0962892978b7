// src/services/translation_service.rs
//
// Translation screen: lookups over the loaded strings.

use crate::domain::Translation;
use crate::services::collection_editor::CollectionEditor;

impl CollectionEditor<Translation> {
    /// Value of `key` in `language`, falling back to the base language
    /// (`de` for `de-AT`) when there is no exact entry.
    pub fn value_for(&self, key: &str, language: &str) -> Option<&str> {
        self.exact_value(key, language).or_else(|| {
            language
                .split_once('-')
                .and_then(|(base, _)| self.exact_value(key, base))
        })
    }

    fn exact_value(&self, key: &str, language: &str) -> Option<&str> {
        self.records()
            .iter()
            .find(|t| t.key == key && t.language == language)
            .map(|t| t.value.as_str())
    }

    /// Languages with at least one entry, sorted.
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> =
            self.records().iter().map(|t| t.language.clone()).collect();
        languages.sort();
        languages.dedup();
        languages
    }

    /// Keys present in `reference` but missing in `language`.
    pub fn missing_keys(&self, reference: &str, language: &str) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .records()
            .iter()
            .filter(|t| t.language == reference)
            .filter(|t| {
                !self
                    .records()
                    .iter()
                    .any(|other| other.language == language && other.key == t.key)
            })
            .map(|t| t.key.as_str())
            .collect();
        missing.sort_unstable();
        missing
    }
}

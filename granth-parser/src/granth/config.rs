//! Run configuration for a single document
//!
//!     A [`ScanConfig`] describes one source document: which running headers to drop,
//!     which literals open a question or an answer, and which OCR typos to repair. It is
//!     produced by hierarchical config merging outside this crate (see `granth-config`)
//!     and is immutable for the duration of a run.

use crate::granth::lexing::normalization::Language;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Typical left/right pixel extent of body text on one page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageMargins {
    #[serde(default)]
    pub prose_left_margin: f64,
    #[serde(default)]
    pub prose_right_margin: f64,
}

impl PageMargins {
    pub fn new(prose_left_margin: f64, prose_right_margin: f64) -> Self {
        Self {
            prose_left_margin,
            prose_right_margin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub language: Language,
    /// Running header/footer patterns, tried in order.
    pub header_regex: Vec<String>,
    /// Literals that open a question turn. Empty, together with `answer_prefix`, means
    /// the language's built-in dialogue prefixes.
    pub question_prefix: Vec<String>,
    pub answer_prefix: Vec<String>,
    /// Literal `(from, to)` replacements applied after the built-in typo table.
    pub typo_list: Vec<(String, String)>,
    /// Suffixes that end a recombined prose/dialogue run. Empty means the
    /// language defaults.
    pub paragraph_end_suffixes: Vec<String>,
}

impl ScanConfig {
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Question prefixes followed by answer prefixes, in configured order, or the
    /// language's built-in prefixes when neither list is configured.
    pub fn dialogue_prefixes(&self) -> Vec<&str> {
        if self.question_prefix.is_empty() && self.answer_prefix.is_empty() {
            return self.language.dialogue_prefixes().to_vec();
        }
        self.question_prefix
            .iter()
            .chain(self.answer_prefix.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn end_suffixes(&self) -> Vec<String> {
        if self.paragraph_end_suffixes.is_empty() {
            self.language
                .paragraph_end_suffixes()
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.paragraph_end_suffixes.clone()
        }
    }
}

/// Errors raised while compiling a [`ScanConfig`] for a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid header_regex '{pattern}': {message}")]
    InvalidHeaderRegex { pattern: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialogue_prefixes_keep_question_first() {
        let config = ScanConfig {
            question_prefix: vec!["प्रश्न:".into(), "शंका:".into()],
            answer_prefix: vec!["उत्तर:".into()],
            ..ScanConfig::default()
        };
        assert_eq!(config.dialogue_prefixes(), vec!["प्रश्न:", "शंका:", "उत्तर:"]);
    }

    #[test]
    fn test_dialogue_prefixes_fall_back_to_language() {
        let config = ScanConfig::for_language(Language::Gujarati);
        let prefixes = config.dialogue_prefixes();
        assert!(prefixes.contains(&"પ્રશ્ન:"));
        assert!(prefixes.contains(&"ઉત્તર:"));
        assert!(!prefixes.contains(&"प्रश्न:"));

        // Configuring only answers still replaces the built-in list.
        let answers_only = ScanConfig {
            answer_prefix: vec!["જવાબ:".into()],
            ..ScanConfig::for_language(Language::Gujarati)
        };
        assert_eq!(answers_only.dialogue_prefixes(), vec!["જવાબ:"]);
    }

    #[test]
    fn test_end_suffixes_fall_back_to_language() {
        let config = ScanConfig::for_language(Language::Gujarati);
        assert_eq!(config.end_suffixes(), vec!["।", "॥", "."]);

        let custom = ScanConfig {
            paragraph_end_suffixes: vec!["।".into()],
            ..ScanConfig::default()
        };
        assert_eq!(custom.end_suffixes(), vec!["।"]);
    }

    #[test]
    fn test_typo_list_deserializes_from_pairs() {
        let config: ScanConfig =
            serde_json::from_str(r#"{"language": "hindi", "typo_list": [["हे", "है"]]}"#).unwrap();
        assert_eq!(config.typo_list, vec![("हे".to_string(), "है".to_string())]);
        assert!(config.header_regex.is_empty());
    }
}

//! Text Normalization
//!
//!     OCR output of scanned Devanagari and Gujarati pages has a small set of recurring,
//!     well understood defects. Normalization repairs them before a line is classified, so the
//!     classifier can rely on clean punctuation and prefixes. The steps, in order:
//!
//!         1. OCR substitutions: a pipe, `1`, `I` or `l` read in place of a danda.
//!         2. Typo table: the language's built-in literal corrections, then the configured ones,
//!            repeated until nothing changes.
//!         3. Whitespace: no space after an opening bracket/quote, none before closing
//!            punctuation or a danda, runs of blanks collapsed.
//!         4. Dialogue-aware joining: a line break becomes a single space unless the next line
//!            opens with a dialogue prefix, so every speaker turn starts on a fresh line.
//!
//!     Hindi and Gujarati share these steps and differ only in their tables, see
//!     [hindi] and [gujarati]. Normalization is idempotent for the built-in tables.

mod gujarati;
mod hindi;

use crate::granth::config::ScanConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound on typo table passes, reached only by a cyclic configured typo list.
const MAX_TYPO_PASSES: usize = 16;

static DOUBLE_DANDA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[|।]{2}").unwrap());

static SINGLE_PIPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|").unwrap());

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

static SPACE_AFTER_OPENING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([(\[{“‘])[ \t]+").unwrap());

static SPACE_BEFORE_CLOSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+([)\]}”’,;:?!।॥])").unwrap());

static DEVANAGARI_DANDA: Lazy<Regex> =
    Lazy::new(|| danda_lookalike_regex(hindi::TABLES.script_class));

static GUJARATI_DANDA: Lazy<Regex> =
    Lazy::new(|| danda_lookalike_regex(gujarati::TABLES.script_class));

fn danda_lookalike_regex(script_class: &str) -> Regex {
    Regex::new(&format!(r"({})[1Il](\s|$)", script_class)).unwrap()
}

/// Static per-language tables.
pub(crate) struct LanguageTables {
    /// Regex character class of the script's letters and signs.
    pub script_class: &'static str,
    pub typos: &'static [(&'static str, &'static str)],
    pub dialogue_prefixes: &'static [&'static str],
    pub sentence_terminators: &'static [char],
    pub paragraph_end_suffixes: &'static [&'static str],
}

/// Source language of a scanned document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Hindi,
    Gujarati,
}

impl Language {
    fn tables(self) -> &'static LanguageTables {
        match self {
            Language::Hindi => &hindi::TABLES,
            Language::Gujarati => &gujarati::TABLES,
        }
    }

    pub fn sentence_terminators(self) -> &'static [char] {
        self.tables().sentence_terminators
    }

    pub fn dialogue_prefixes(self) -> &'static [&'static str] {
        self.tables().dialogue_prefixes
    }

    pub fn typos(self) -> &'static [(&'static str, &'static str)] {
        self.tables().typos
    }

    pub fn paragraph_end_suffixes(self) -> &'static [&'static str] {
        self.tables().paragraph_end_suffixes
    }

    fn danda_lookalike(self) -> &'static Regex {
        match self {
            Language::Hindi => &DEVANAGARI_DANDA,
            Language::Gujarati => &GUJARATI_DANDA,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Hindi => write!(f, "hindi"),
            Language::Gujarati => write!(f, "gujarati"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hindi" | "hi" => Ok(Language::Hindi),
            "gujarati" | "gu" => Ok(Language::Gujarati),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}

/// Per-language text cleanup applied before classification.
#[derive(Debug, Clone)]
pub struct Normalizer {
    language: Language,
    typos: Vec<(String, String)>,
    dialogue_prefixes: Vec<String>,
}

impl Normalizer {
    /// A normalizer using only the built-in tables for `language`.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            typos: language
                .typos()
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            dialogue_prefixes: language
                .dialogue_prefixes()
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    /// Built-in tables extended with the configured typo list and dialogue prefixes.
    pub fn from_config(config: &ScanConfig) -> Self {
        let mut normalizer = Self::new(config.language);
        normalizer.typos.extend(
            config
                .typo_list
                .iter()
                .filter(|(from, _)| !from.is_empty())
                .cloned(),
        );
        for prefix in config.dialogue_prefixes() {
            if !prefix.is_empty() && !normalizer.dialogue_prefixes.iter().any(|p| p == prefix) {
                normalizer.dialogue_prefixes.push(prefix.to_string());
            }
        }
        normalizer
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn normalize(&self, text: &str) -> String {
        let text = self.correct_ocr_substitutions(text);
        let text = self.correct_typos(&text);
        let text = tighten_whitespace(&text);
        let text = self.join_dialogue_lines(&text);
        // Joining can leave a space in front of closing punctuation, and tightening can
        // then bring two dandas together.
        let text = tighten_whitespace(&text);
        DOUBLE_DANDA.replace_all(&text, "॥").into_owned()
    }

    fn correct_ocr_substitutions(&self, text: &str) -> String {
        let text = DOUBLE_DANDA.replace_all(text, "॥");
        let text = SINGLE_PIPE.replace_all(&text, "।");
        self.language
            .danda_lookalike()
            .replace_all(&text, "${1}।${2}")
            .into_owned()
    }

    /// Apply the typo table until the text stops changing, since one correction can
    /// produce the input of an earlier one (`कंेा` becomes `केंा`, then `केां`).
    fn correct_typos(&self, text: &str) -> String {
        let mut text = text.to_string();
        for _ in 0..MAX_TYPO_PASSES {
            let corrected = self.correct_typos_once(&text);
            if corrected == text {
                return text;
            }
            text = corrected;
        }
        tracing::warn!(
            passes = MAX_TYPO_PASSES,
            "typo corrections did not settle, check typo_list for cycles"
        );
        text
    }

    fn correct_typos_once(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (from, to) in &self.typos {
            if text.contains(from.as_str()) {
                text = text.replace(from.as_str(), to);
            }
        }
        text
    }

    fn join_dialogue_lines(&self, text: &str) -> String {
        let mut joined = String::with_capacity(text.len());
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if !joined.is_empty() {
                if self.starts_dialogue_turn(line) {
                    joined.push('\n');
                } else {
                    joined.push(' ');
                }
            }
            joined.push_str(line);
        }
        joined
    }

    fn starts_dialogue_turn(&self, line: &str) -> bool {
        self.dialogue_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }
}

fn tighten_whitespace(text: &str) -> String {
    let text = BLANK_RUN.replace_all(text, " ");
    let text = SPACE_AFTER_OPENING.replace_all(&text, "$1");
    SPACE_BEFORE_CLOSING
        .replace_all(&text, "$1")
        .into_owned()
}

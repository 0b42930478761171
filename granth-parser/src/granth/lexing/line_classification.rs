//! Line Classification
//!
//! Core classification logic for tagging OCR lines from their geometry and text.
//! Classification is pure and total: a line that matches nothing simply carries no
//! affirmative tag and falls into default prose buffering.
use crate::granth::config::{ConfigError, PageMargins, ScanConfig};
use crate::granth::lexing::normalization::Language;
use crate::granth::token::{Line, RawLine, Tag, TagSet};
use once_cell::sync::Lazy;
use regex::Regex;

/// Left indentation (px) beyond the prose margin that makes a line indented.
pub const INDENT_THRESHOLD: f64 = 15.0;
/// Right gap (px) that, together with indentation, makes a line centered.
pub const CENTERED_RIGHT_THRESHOLD: f64 = 20.0;
/// Right gap (px) that makes a line stop short of the prose margin.
pub const RIGHT_JUSTIFIED_THRESHOLD: f64 = 15.0;

/// Fixed markers that open a heading line.
pub const HEADING_PREFIXES: [&str; 6] = ["★", "काव्य -", "काव्य-", "अर्थः", "शब्दार्थः", "शब्दार्थ"];

/// A numbered verse end: `॥ 12 ॥`, `॥१२॥`, `॥ ૧૨ ॥`.
static NUMBERED_VERSE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"॥\s*[0-9०-९૦-૯]+\s*॥\s*$").unwrap());

/// Classifier compiled once per run from a [`ScanConfig`].
#[derive(Debug, Clone)]
pub struct LineClassifier {
    language: Language,
    header_patterns: Vec<Regex>,
    qa_prefixes: Vec<String>,
}

impl LineClassifier {
    /// Compile the configured header patterns. This is the only fallible step of a run.
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        let header_patterns = config
            .header_regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidHeaderRegex {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let qa_prefixes = config
            .dialogue_prefixes()
            .into_iter()
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self {
            language: config.language,
            header_patterns,
            qa_prefixes,
        })
    }

    /// Tag one raw line against its page margins.
    pub fn classify(&self, raw: &RawLine, page_num: u32, margins: &PageMargins) -> Line {
        let stripped = raw.text.trim();
        let mut line = Line {
            text: raw.text.clone(),
            x_start: raw.x_start,
            x_end: raw.x_end,
            page_num,
            line_num: raw.line_num,
            tags: TagSet::empty(),
            speaker: None,
        };

        if stripped.is_empty() {
            line.tags.insert(Tag::Empty);
            return line;
        }

        let left_indent = raw.x_start as f64 - margins.prose_left_margin;
        let right_indent = margins.prose_right_margin - raw.x_end as f64;
        let is_indented = left_indent > INDENT_THRESHOLD;
        if is_indented && right_indent > CENTERED_RIGHT_THRESHOLD {
            line.tags.insert(Tag::Centered);
        } else if is_indented {
            line.tags.insert(Tag::Indented);
        }
        if right_indent > RIGHT_JUSTIFIED_THRESHOLD {
            line.tags.insert(Tag::NotRightJustified);
        }

        if self.is_header(stripped) {
            line.tags.insert(Tag::HeaderRegex);
        }
        if let Some(speaker) = self.match_speaker(stripped) {
            line.tags.insert(Tag::Qa);
            line.speaker = Some(speaker.to_string());
        }
        if is_heading(stripped) {
            line.tags.insert(Tag::Heading);
        }
        if ends_with_terminator(stripped, self.language) {
            line.tags.insert(Tag::HasSentenceTerminator);
        }
        if is_numbered_verse_end(stripped) {
            line.tags.insert(Tag::AbsoluteTerminator);
        }

        tracing::trace!(
            page = page_num,
            line = raw.line_num,
            tags = %line.tags,
            "classified line"
        );
        line
    }

    fn is_header(&self, stripped: &str) -> bool {
        self.header_patterns
            .iter()
            .any(|pattern| pattern.is_match(stripped))
    }

    fn match_speaker(&self, stripped: &str) -> Option<&str> {
        self.qa_prefixes
            .iter()
            .find(|prefix| stripped.starts_with(prefix.as_str()))
            .map(String::as_str)
    }
}

/// Check if line opens with one of the fixed heading markers
pub fn is_heading(stripped: &str) -> bool {
    HEADING_PREFIXES
        .iter()
        .any(|prefix| stripped.starts_with(prefix))
}

/// Check if line ends with a sentence terminator of `language`
pub fn ends_with_terminator(stripped: &str, language: Language) -> bool {
    stripped
        .chars()
        .last()
        .is_some_and(|c| language.sentence_terminators().contains(&c))
}

/// Check if line ends with a numbered verse end (`॥ 12 ॥`)
pub fn is_numbered_verse_end(stripped: &str) -> bool {
    NUMBERED_VERSE_END.is_match(stripped)
}

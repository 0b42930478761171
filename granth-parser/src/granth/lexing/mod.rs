//! Lexing
//!
//!     Lexing turns raw OCR line records into classified [`Line`]s. There is no tokenizer:
//!     OCR already split the page into lines and gave each one a bounding box, so the work
//!     here is per line and in two steps:
//!
//!         1. Normalization of the text, see [normalization]. This repairs known OCR
//!            defects for the document language so later checks see clean punctuation.
//!         2. Classification, see [line_classification]. Geometry against the page
//!            margins plus a handful of textual checks produce the line's [`TagSet`].
//!
//!     At this point lexing is complete. The paragraph state machine in
//!     [parsing](crate::granth::parsing) consumes the tagged lines in order.
//!
//! [`Line`]: crate::granth::token::Line
//! [`TagSet`]: crate::granth::token::TagSet

pub mod line_classification;
pub mod normalization;

pub use line_classification::LineClassifier;
pub use normalization::{Language, Normalizer};

use crate::granth::config::{ConfigError, ScanConfig};
use crate::granth::document::Document;
use crate::granth::token::{Line, RawLine};

/// Normalization and classification bound to one run configuration.
#[derive(Debug, Clone)]
pub struct LineLexer {
    normalizer: Normalizer,
    classifier: LineClassifier,
}

impl LineLexer {
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            normalizer: Normalizer::from_config(config),
            classifier: LineClassifier::new(config)?,
        })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Normalize and classify every line of `document`, in page order.
    pub fn lex(&self, document: &Document) -> Vec<Line> {
        let mut lines = Vec::with_capacity(document.line_count());
        for page in &document.pages {
            for raw in &page.lines {
                let normalized = RawLine {
                    text: self.normalizer.normalize(&raw.text),
                    ..raw.clone()
                };
                lines.push(
                    self.classifier
                        .classify(&normalized, page.page_num, &page.margins),
                );
            }
        }
        lines
    }
}

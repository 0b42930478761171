//! Document and batch segmentation
//!
//! This module is the entry point for callers holding complete per-document line sequences.
//!
//! # Architecture
//!
//! A [`Segmenter`] compiles one [`ScanConfig`] into the full transform pipeline:
//!
//! 1. **Normalization** - per-language OCR repair of each line's text
//! 2. **Classification** - geometry and text tags against the page margins
//! 3. **Phase 1** - the paragraph state machine
//! 4. **Phase 2** - same-type block merge
//! 5. **Phase 3** - prose/dialogue recombination
//!
//! The compiled pipeline holds no mutable state. Every document gets its own state machine,
//! so one `Segmenter` can serve many documents, including in parallel via
//! [`Segmenter::segment_batch`]. Output order always matches input line order.
//!
//! # Usage
//!
//! ```rust,ignore
//! use granth_parser::granth::pipeline::Segmenter;
//!
//! let segmenter = Segmenter::new(&config)?;
//! let paragraphs = segmenter.segment(document)?;
//! ```

use crate::granth::config::{ConfigError, ScanConfig};
use crate::granth::document::Document;
use crate::granth::parsing::Paragraph;
use crate::granth::transforms::standard::{segmentation_pipeline, SegmentationTransform};
use crate::granth::transforms::TransformError;
use rayon::prelude::*;
use thiserror::Error;

/// Errors from a full segmentation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentError {
    #[error("invalid scan config: {0}")]
    Config(#[from] ConfigError),
    #[error("segmentation failed: {0}")]
    Transform(#[from] TransformError),
}

/// A scan configuration compiled into a reusable segmentation pipeline.
pub struct Segmenter {
    config: ScanConfig,
    pipeline: SegmentationTransform,
}

impl Segmenter {
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.clone(),
            pipeline: segmentation_pipeline(config)?,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Segment one document into ordered paragraphs.
    pub fn segment(&self, document: Document) -> Result<Vec<Paragraph>, TransformError> {
        let pages = document.pages.len();
        let lines = document.line_count();
        let paragraphs = self.pipeline.run(document)?;
        tracing::info!(
            pages,
            lines,
            paragraphs = paragraphs.len(),
            language = %self.config.language,
            "segmented document"
        );
        Ok(paragraphs)
    }

    /// Segment many documents in parallel. Results keep the input order.
    pub fn segment_batch(
        &self,
        documents: Vec<Document>,
    ) -> Vec<Result<Vec<Paragraph>, TransformError>> {
        documents
            .into_par_iter()
            .map(|document| self.segment(document))
            .collect()
    }
}

/// Convenience helper for a single document with its own configuration.
pub fn segment_document(
    document: Document,
    config: &ScanConfig,
) -> Result<Vec<Paragraph>, SegmentError> {
    let segmenter = Segmenter::new(config)?;
    Ok(segmenter.segment(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::granth::parsing::State;
    use crate::granth::testing::factories::{mk_page, Layout};

    fn verse_document(page_num: u32, text: &str) -> Document {
        Document::new(vec![mk_page(page_num, &[(text, Layout::Centered)])])
    }

    #[test]
    fn test_batch_preserves_document_order() {
        let segmenter = Segmenter::new(&ScanConfig::default()).unwrap();
        let documents: Vec<Document> = (1..=16)
            .map(|n| verse_document(n, &format!("पद {}", n)))
            .collect();

        let results = segmenter.segment_batch(documents);
        assert_eq!(results.len(), 16);
        for (i, result) in results.into_iter().enumerate() {
            let paragraphs = result.unwrap();
            assert_eq!(paragraphs.len(), 1);
            assert_eq!(paragraphs[0].page_num, i as u32 + 1);
            assert_eq!(paragraphs[0].text, format!("पद {}", i + 1));
            assert_eq!(paragraphs[0].kind, State::VerseBlock);
        }
    }

    #[test]
    fn test_segment_document_reports_config_errors() {
        let config = ScanConfig {
            header_regex: vec!["(?P<".to_string()],
            ..ScanConfig::default()
        };
        let err = segment_document(Document::default(), &config).unwrap_err();
        assert!(matches!(err, SegmentError::Config(_)));
    }

    #[test]
    fn test_empty_document_has_no_paragraphs() {
        let paragraphs = segment_document(Document::default(), &ScanConfig::default()).unwrap();
        assert!(paragraphs.is_empty());
    }
}

//! Standard transform definitions
//!
//! The full segmentation pipeline depends on the run's [`ScanConfig`], so instead of static
//! transforms this module offers a builder that compiles a configuration once.

use crate::granth::assembling::{BlockMerge, Recombination};
use crate::granth::config::{ConfigError, ScanConfig};
use crate::granth::document::Document;
use crate::granth::lexing::LineLexer;
use crate::granth::parsing::Paragraph;
use crate::granth::transforms::stages::{Classification, Segmentation};
use crate::granth::transforms::Transform;

/// Type alias for the complete segmentation transform
pub type SegmentationTransform = Transform<Document, Vec<Paragraph>>;

/// Document to paragraphs: Document → Vec<Paragraph>
///
/// 1. Normalization and classification
/// 2. Phase 1 state machine
/// 3. Phase 2 same-type block merge
/// 4. Phase 3 prose/dialogue recombination
pub fn segmentation_pipeline(config: &ScanConfig) -> Result<SegmentationTransform, ConfigError> {
    let lexer = LineLexer::new(config)?;
    Ok(Transform::from_fn(|document: Document| Ok(document))
        .then(Classification::new(lexer))
        .then(Segmentation::new())
        .then(BlockMerge::new())
        .then(Recombination::new(config.end_suffixes())))
}

/// Phases 1 and 2 only, for inspecting blocks before recombination.
pub fn block_pipeline(config: &ScanConfig) -> Result<SegmentationTransform, ConfigError> {
    let lexer = LineLexer::new(config)?;
    Ok(Transform::from_fn(|document: Document| Ok(document))
        .then(Classification::new(lexer))
        .then(Segmentation::new())
        .then(BlockMerge::new()))
}

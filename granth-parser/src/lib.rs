//! # granth
//!
//! Paragraph segmentation for OCR output of scanned Hindi and Gujarati scripture.
//!
//! File Layout
//!
//! The crate follows the order in which a document flows through it:
//! src/granth
//!   ├── token        Classified line types (tags, raw input records)
//!   ├── lexing       Per-language normalization and line classification
//!   ├── parsing      The phase 1 state machine (lines to paragraphs)
//!   ├── assembling   Phase 2 block merge and phase 3 recombination
//!   ├── transforms   Composable stages wiring the phases together
//!   ├── pipeline     Document and batch entry points
//!   └── formats      Output shaping for the downstream indexing stage
//!
//! For test factories see the [testing module](granth::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod granth;

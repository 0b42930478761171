//! Output shaping for the downstream chunking/indexing stage
//!
//! The indexing stage consumes ordered `(page_num, paragraph_text)` pairs and persists one
//! text blob per page, paragraphs joined by a fixed delimiter. This module produces both
//! shapes, and hosts the [registry] of serialization formats used by the CLI.

pub mod json;
pub mod registry;
pub mod text;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use text::TextFormatter;

use crate::granth::parsing::Paragraph;
use std::collections::BTreeMap;

/// Delimiter placed between paragraphs of one page unless configured otherwise.
pub const DEFAULT_PARAGRAPH_DELIMITER: &str = "\n\n----\n\n";

/// Ordered `(page_num, text)` pairs.
pub fn into_pairs(paragraphs: Vec<Paragraph>) -> Vec<(u32, String)> {
    paragraphs
        .into_iter()
        .map(|paragraph| (paragraph.page_num, paragraph.text))
        .collect()
}

/// One text blob per page, paragraphs joined by `delimiter`, pages ascending.
pub fn render_pages(paragraphs: &[Paragraph], delimiter: &str) -> BTreeMap<u32, String> {
    let mut pages: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    for paragraph in paragraphs {
        pages
            .entry(paragraph.page_num)
            .or_default()
            .push(paragraph.text.as_str());
    }
    pages
        .into_iter()
        .map(|(page_num, texts)| (page_num, texts.join(delimiter)))
        .collect()
}

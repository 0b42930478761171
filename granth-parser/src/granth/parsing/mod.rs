//! Parsing
//!
//!     Parsing is phase 1 of segmentation: the [engine] state machine consumes classified
//!     lines one at a time and emits typed [`Paragraph`]s. Phases 2 and 3, which only ever
//!     build new records from these, live in [assembling](crate::granth::assembling).

pub mod engine;
pub mod paragraph;

pub use engine::{segment_lines, ParagraphGenerator};
pub use paragraph::{Paragraph, State};

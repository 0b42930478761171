//! Classified line types shared across the classifier, the state machine, and tooling.

pub mod line;

pub use line::{Line, RawLine, Tag, TagSet};

//! Lexing and phase 1 stages
//!
//! The phase 2 and phase 3 stages are [`BlockMerge`](crate::granth::assembling::BlockMerge)
//! and [`Recombination`](crate::granth::assembling::Recombination).

use crate::granth::document::Document;
use crate::granth::lexing::LineLexer;
use crate::granth::parsing::{segment_lines, Paragraph};
use crate::granth::token::Line;
use crate::granth::transforms::{Runnable, TransformError};

/// Normalization plus classification of every line of a document.
///
/// # Input
/// - `Document` - OCR lines with page margins
///
/// # Output
/// - `Vec<Line>` - tagged lines in page order
pub struct Classification {
    lexer: LineLexer,
}

impl Classification {
    pub fn new(lexer: LineLexer) -> Self {
        Self { lexer }
    }
}

impl Runnable<Document, Vec<Line>> for Classification {
    fn run(&self, input: Document) -> Result<Vec<Line>, TransformError> {
        Ok(self.lexer.lex(&input))
    }
}

impl Runnable<&Document, Vec<Line>> for Classification {
    fn run(&self, input: &Document) -> Result<Vec<Line>, TransformError> {
        Ok(self.lexer.lex(input))
    }
}

/// The phase 1 state machine over a complete line sequence.
pub struct Segmentation;

impl Segmentation {
    pub fn new() -> Self {
        Segmentation
    }
}

impl Default for Segmentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<Line>, Vec<Paragraph>> for Segmentation {
    fn run(&self, input: Vec<Line>) -> Result<Vec<Paragraph>, TransformError> {
        Ok(segment_lines(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::granth::config::ScanConfig;
    use crate::granth::parsing::State;
    use crate::granth::testing::factories::{mk_line, mk_page, Layout};
    use crate::granth::token::Tag;

    #[test]
    fn test_classification_stage() {
        let document = Document::new(vec![mk_page(
            1,
            &[("श्लोक", Layout::Centered), ("", Layout::Full)],
        )]);
        let stage = Classification::new(LineLexer::new(&ScanConfig::default()).unwrap());
        let lines = stage.run(&document).unwrap();
        assert!(lines[0].has(Tag::Centered));
        assert!(lines[1].has(Tag::Empty));
    }

    #[test]
    fn test_segmentation_stage() {
        let lines = vec![mk_line("a", &[Tag::Centered]), mk_line("b", &[])];
        let paragraphs = Segmentation::new().run(lines).unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].kind, State::VerseBlock);
    }
}

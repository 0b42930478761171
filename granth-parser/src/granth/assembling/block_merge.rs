//! Same-type block merge (phase 2)
//!
//! Consecutive VERSE_BLOCK entries become one verse block, and consecutive QA_BLOCK entries
//! one dialogue block, joined with newlines. STANDARD_PROSE entries pass through untouched.
//! Running the merge on its own output changes nothing.

use crate::granth::parsing::{Paragraph, State};
use crate::granth::transforms::{Runnable, TransformError};

const BLOCK_SEPARATOR: &str = "\n";

fn is_block(kind: State) -> bool {
    matches!(kind, State::VerseBlock | State::QaBlock)
}

pub fn merge_blocks(paragraphs: &[Paragraph]) -> Vec<Paragraph> {
    let mut merged = Vec::with_capacity(paragraphs.len());
    let mut start = 0;
    while start < paragraphs.len() {
        let kind = paragraphs[start].kind;
        if !is_block(kind) {
            merged.push(paragraphs[start].clone());
            start += 1;
            continue;
        }
        let end = paragraphs[start..]
            .iter()
            .position(|p| p.kind != kind)
            .map_or(paragraphs.len(), |offset| start + offset);
        if let Some(block) = Paragraph::combine(&paragraphs[start..end], kind, BLOCK_SEPARATOR) {
            merged.push(block);
        }
        start = end;
    }
    merged
}

/// Phase 2 as a pipeline stage.
pub struct BlockMerge;

impl BlockMerge {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BlockMerge {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<Paragraph>, Vec<Paragraph>> for BlockMerge {
    fn run(&self, input: Vec<Paragraph>) -> Result<Vec<Paragraph>, TransformError> {
        let merged = merge_blocks(&input);
        tracing::debug!(before = input.len(), after = merged.len(), "merged blocks");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::granth::testing::factories::mk_paragraph;

    #[test]
    fn test_consecutive_verse_blocks_merge_keeping_first_page() {
        let input = vec![
            mk_paragraph("पद एक", 4, State::VerseBlock),
            mk_paragraph("पद दो", 5, State::VerseBlock),
            mk_paragraph("गद्य", 5, State::StandardProse),
        ];
        assert_eq!(
            merge_blocks(&input),
            vec![
                mk_paragraph("पद एक\nपद दो", 4, State::VerseBlock),
                mk_paragraph("गद्य", 5, State::StandardProse),
            ]
        );
    }

    #[test]
    fn test_prose_is_never_merged() {
        let input = vec![
            mk_paragraph("क", 1, State::StandardProse),
            mk_paragraph("ख", 1, State::StandardProse),
        ];
        assert_eq!(merge_blocks(&input), input);
    }

    #[test]
    fn test_different_block_types_stay_apart() {
        let input = vec![
            mk_paragraph("प्रश्न: क्यों?", 1, State::QaBlock),
            mk_paragraph("उत्तर: यों।", 1, State::QaBlock),
            mk_paragraph("श्लोक", 1, State::VerseBlock),
            mk_paragraph("प्रश्न: फिर?", 2, State::QaBlock),
        ];
        assert_eq!(
            merge_blocks(&input),
            vec![
                mk_paragraph("प्रश्न: क्यों?\nउत्तर: यों।", 1, State::QaBlock),
                mk_paragraph("श्लोक", 1, State::VerseBlock),
                mk_paragraph("प्रश्न: फिर?", 2, State::QaBlock),
            ]
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let input = vec![
            mk_paragraph("a", 1, State::VerseBlock),
            mk_paragraph("b", 1, State::VerseBlock),
            mk_paragraph("c", 1, State::StandardProse),
            mk_paragraph("d", 2, State::QaBlock),
            mk_paragraph("e", 2, State::QaBlock),
        ];
        let once = merge_blocks(&input);
        assert_eq!(merge_blocks(&once), once);
    }

    #[test]
    fn test_stage_runs_merge() {
        let input = vec![
            mk_paragraph("a", 1, State::VerseBlock),
            mk_paragraph("b", 1, State::VerseBlock),
        ];
        let output = BlockMerge::new().run(input).unwrap();
        assert_eq!(output, vec![mk_paragraph("a\nb", 1, State::VerseBlock)]);
    }
}

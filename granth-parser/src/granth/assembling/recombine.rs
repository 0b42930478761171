//! Prose/dialogue recombination (phase 3)
//!
//! A greedy forward scan joins fragments back into complete paragraphs, using punctuation
//! as the signal that a paragraph is done:
//!
//!     - VERSE_BLOCK entries pass through unchanged and are never absorbed.
//!     - A run started by STANDARD_PROSE absorbs only further STANDARD_PROSE entries.
//!     - A run started by QA_BLOCK absorbs STANDARD_PROSE and QA_BLOCK entries alike.
//!     - Either run stops once the text absorbed so far ends with an end suffix.
//!
//! Dialogue answers routinely continue in prose-tagged fragments, so a dialogue run may
//! take prose. A prose run must never swallow the question that follows it, so the two
//! rules must not be made symmetric.
//!
//! Absorbed texts are joined with a single space and the run keeps the type of its first
//! entry.

use crate::granth::parsing::{Paragraph, State};
use crate::granth::transforms::{Runnable, TransformError};

const RUN_SEPARATOR: &str = " ";

fn ends_paragraph(text: &str, end_suffixes: &[String]) -> bool {
    let text = text.trim_end();
    end_suffixes
        .iter()
        .any(|suffix| !suffix.is_empty() && text.ends_with(suffix.as_str()))
}

fn can_absorb(run_kind: State, next: State) -> bool {
    match (run_kind, next) {
        (_, State::VerseBlock) => false,
        (State::StandardProse, State::StandardProse) => true,
        (State::StandardProse, State::QaBlock) => false,
        (State::QaBlock, _) => true,
        (State::VerseBlock, _) => false,
    }
}

pub fn recombine(paragraphs: &[Paragraph], end_suffixes: &[String]) -> Vec<Paragraph> {
    let mut recombined = Vec::with_capacity(paragraphs.len());
    let mut start = 0;
    while start < paragraphs.len() {
        let first = &paragraphs[start];
        if first.kind == State::VerseBlock {
            recombined.push(first.clone());
            start += 1;
            continue;
        }

        let mut end = start + 1;
        let mut tail = first.text.as_str();
        while end < paragraphs.len()
            && !ends_paragraph(tail, end_suffixes)
            && can_absorb(first.kind, paragraphs[end].kind)
        {
            tail = paragraphs[end].text.as_str();
            end += 1;
        }

        if end - start > 1 {
            tracing::trace!(
                kind = %first.kind,
                page = first.page_num,
                fragments = end - start,
                "recombined fragments"
            );
        }
        if let Some(run) = Paragraph::combine(&paragraphs[start..end], first.kind, RUN_SEPARATOR) {
            recombined.push(run);
        }
        start = end;
    }
    recombined
}

/// Phase 3 as a pipeline stage.
pub struct Recombination {
    end_suffixes: Vec<String>,
}

impl Recombination {
    pub fn new(end_suffixes: Vec<String>) -> Self {
        Self { end_suffixes }
    }
}

impl Runnable<Vec<Paragraph>, Vec<Paragraph>> for Recombination {
    fn run(&self, input: Vec<Paragraph>) -> Result<Vec<Paragraph>, TransformError> {
        let recombined = recombine(&input, &self.end_suffixes);
        tracing::debug!(
            before = input.len(),
            after = recombined.len(),
            "recombined prose and dialogue"
        );
        Ok(recombined)
    }
}

//! Paragraph Engine - Phase 1 State Machine
//!
//!     This module implements the finite-state engine that turns the flat sequence of tagged
//!     lines into typed paragraphs. It owns one mutable buffer and the current [`State`] for
//!     the whole run over one document.
//!
//!     The states are STANDARD_PROSE (initial), VERSE_BLOCK and QA_BLOCK. There is no terminal
//!     state: [`ParagraphGenerator::flush`] finalizes whatever buffer is still open.
//!
//!     Dropped lines (EMPTY and HEADER_REGEX) are handled identically in every state: the open
//!     buffer is finalized and the line is discarded before any state handler runs.
//!
//! Reprocessing
//!
//!     Some transitions switch state and then need the very same line to be evaluated again
//!     under the new state (a centered line in prose opens a verse block and is its first
//!     line). Handlers never call each other: a handler returns the line when it wants it
//!     reprocessed and the driver loop in [`ParagraphGenerator::process_line`] feeds it to the
//!     handler of the new state. Terminators are different: a numbered verse end closing a
//!     dialogue is consumed and the switch back to prose does not reprocess it.
//!
//!     Transitions:
//!
//!         STANDARD_PROSE --[CENTERED]--> VERSE_BLOCK --[not CENTERED]--> STANDARD_PROSE
//!         STANDARD_PROSE --[QA]--> QA_BLOCK --[HEADING | indented non-QA]--> STANDARD_PROSE
//!         QA_BLOCK --[ABSOLUTE_TERMINATOR, consumed]--> STANDARD_PROSE
use crate::granth::parsing::paragraph::{Paragraph, State};
use crate::granth::token::{Line, Tag};

/// Lines collected for the paragraph currently being built.
#[derive(Debug, Default)]
struct Buffer {
    lines: Vec<Line>,
    /// Speaker of the open dialogue turn.
    speaker: Option<String>,
}

/// Phase 1 segmenter. One instance per document; never shared across documents.
#[derive(Debug, Default)]
pub struct ParagraphGenerator {
    state: State,
    buffer: Buffer,
    paragraphs: Vec<Paragraph>,
}

impl ParagraphGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Paragraphs finalized so far.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Feed one classified line. May finalize paragraphs and change state.
    pub fn process_line(&mut self, line: Line) {
        if line.is_dropped() {
            tracing::trace!(
                page = line.page_num,
                line = line.line_num,
                "dropping empty/header line"
            );
            self.finalize();
            return;
        }

        let mut pending = Some(line);
        while let Some(line) = pending {
            pending = match self.state {
                State::StandardProse => self.handle_standard_prose(line),
                State::VerseBlock => self.handle_verse_block(line),
                State::QaBlock => self.handle_qa_block(line),
            };
        }
    }

    /// Finalize any open buffer and return every paragraph in input order.
    pub fn flush(mut self) -> Vec<Paragraph> {
        self.finalize();
        self.paragraphs
    }

    fn handle_standard_prose(&mut self, line: Line) -> Option<Line> {
        if line.has(Tag::Heading) {
            self.finalize();
            self.buffer.lines.push(line);
            self.finalize();
            return None;
        }
        if line.has(Tag::AbsoluteTerminator) {
            self.buffer.lines.push(line);
            self.finalize();
            return None;
        }
        if line.has(Tag::Centered) {
            self.finalize();
            self.transition(State::VerseBlock);
            return Some(line);
        }
        if line.has(Tag::Qa) {
            self.finalize();
            self.transition(State::QaBlock);
            return Some(line);
        }
        if line.has(Tag::Indented) {
            self.finalize();
            self.buffer.lines.push(line);
            return None;
        }

        let closes = line.has(Tag::HasSentenceTerminator) && line.has(Tag::NotRightJustified);
        self.buffer.lines.push(line);
        if closes {
            self.finalize();
        }
        None
    }

    fn handle_verse_block(&mut self, line: Line) -> Option<Line> {
        if line.has(Tag::Centered) {
            self.buffer.lines.push(line);
            return None;
        }
        self.finalize();
        self.transition(State::StandardProse);
        Some(line)
    }

    fn handle_qa_block(&mut self, line: Line) -> Option<Line> {
        if line.has(Tag::Heading) {
            self.finalize();
            self.transition(State::StandardProse);
            return Some(line);
        }
        if line.has(Tag::AbsoluteTerminator) {
            // Consumed here: the line is not reprocessed after the switch.
            self.buffer.lines.push(line);
            self.finalize();
            self.transition(State::StandardProse);
            return None;
        }
        if line.has(Tag::Indented) && !line.has(Tag::Qa) {
            self.finalize();
            self.transition(State::StandardProse);
            return Some(line);
        }
        if line.has(Tag::Qa) {
            match (&self.buffer.speaker, &line.speaker) {
                (None, _) => self.buffer.speaker = line.speaker.clone(),
                (Some(current), Some(next)) if current != next => {
                    self.finalize();
                    self.buffer.speaker = line.speaker.clone();
                }
                _ => {}
            }
        }
        self.buffer.lines.push(line);
        None
    }

    fn transition(&mut self, to: State) {
        tracing::debug!(from = %self.state, to = %to, "state transition");
        self.state = to;
    }

    /// Close the buffer as a paragraph of the current state's type and reset it.
    fn finalize(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        let (Some(first), Some(last)) = (buffer.lines.first(), buffer.lines.last()) else {
            return;
        };
        let text = buffer
            .lines
            .iter()
            .map(|line| line.text.trim())
            .collect::<Vec<_>>()
            .join(self.state.line_separator());
        if text.trim().is_empty() {
            return;
        }

        tracing::debug!(
            kind = %self.state,
            page = first.page_num,
            start_line = first.line_num,
            end_line = last.line_num,
            "finalized paragraph"
        );
        self.paragraphs.push(Paragraph::new(
            text,
            first.page_num,
            self.state,
            first.line_num,
            last.line_num,
        ));
    }
}

/// Run the phase 1 state machine over a complete line sequence.
pub fn segment_lines<I>(lines: I) -> Vec<Paragraph>
where
    I: IntoIterator<Item = Line>,
{
    let mut generator = ParagraphGenerator::new();
    for line in lines {
        generator.process_line(line);
    }
    generator.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::granth::testing::factories::{mk_line, mk_qa};

    fn texts(paragraphs: &[Paragraph]) -> Vec<(&str, State)> {
        paragraphs
            .iter()
            .map(|p| (p.text.as_str(), p.kind))
            .collect()
    }

    #[test]
    fn test_centered_lines_form_one_verse_block() {
        let paragraphs = segment_lines(vec![
            mk_line("a", &[Tag::Centered]),
            mk_line("b", &[Tag::Centered]),
            mk_line("c", &[Tag::Centered]),
        ]);
        assert_eq!(texts(&paragraphs), vec![("a\nb\nc", State::VerseBlock)]);
    }

    #[test]
    fn test_prose_lines_join_with_spaces_and_trim() {
        let paragraphs = segment_lines(vec![
            mk_line("  पहली पंक्ति ", &[]),
            mk_line("दूसरी पंक्ति", &[]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![("पहली पंक्ति दूसरी पंक्ति", State::StandardProse)]
        );
    }

    #[test]
    fn test_header_line_forces_finalization_and_is_dropped() {
        let paragraphs = segment_lines(vec![
            mk_line("पहला भाग", &[]),
            mk_line("पृष्ठ 12", &[Tag::HeaderRegex]),
            mk_line("दूसरा भाग", &[]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![
                ("पहला भाग", State::StandardProse),
                ("दूसरा भाग", State::StandardProse)
            ]
        );
    }

    #[test]
    fn test_empty_line_is_dropped_in_every_state() {
        let paragraphs = segment_lines(vec![
            mk_line("a", &[Tag::Centered]),
            mk_line("", &[Tag::Empty]),
            mk_line("b", &[Tag::Centered]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![("a", State::VerseBlock), ("b", State::VerseBlock)]
        );
    }

    #[test]
    fn test_heading_is_a_singleton() {
        let paragraphs = segment_lines(vec![
            mk_line("पूर्व", &[]),
            mk_line("★ मंगलाचरण", &[Tag::Heading]),
            mk_line("आगे", &[]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![
                ("पूर्व", State::StandardProse),
                ("★ मंगलाचरण", State::StandardProse),
                ("आगे", State::StandardProse)
            ]
        );
    }

    #[test]
    fn test_absolute_terminator_closes_prose_and_stays() {
        let mut generator = ParagraphGenerator::new();
        generator.process_line(mk_line("धर्मो रक्षति", &[]));
        generator.process_line(mk_line("रक्षितः ॥ १२ ॥", &[Tag::AbsoluteTerminator]));
        assert_eq!(generator.state(), State::StandardProse);
        assert_eq!(generator.paragraphs().len(), 1);
        generator.process_line(mk_line("आगे", &[]));
        assert_eq!(
            texts(&generator.flush()),
            vec![
                ("धर्मो रक्षति रक्षितः ॥ १२ ॥", State::StandardProse),
                ("आगे", State::StandardProse)
            ]
        );
    }

    #[test]
    fn test_indented_line_starts_new_prose_paragraph() {
        let paragraphs = segment_lines(vec![
            mk_line("पहला", &[]),
            mk_line("नया अनुच्छेद", &[Tag::Indented]),
            mk_line("जारी", &[]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![
                ("पहला", State::StandardProse),
                ("नया अनुच्छेद जारी", State::StandardProse)
            ]
        );
    }

    #[test]
    fn test_short_terminated_line_closes_prose() {
        let paragraphs = segment_lines(vec![
            mk_line("वाक्य चलता", &[]),
            mk_line("है।", &[Tag::HasSentenceTerminator, Tag::NotRightJustified]),
            mk_line("पूर्ण पंक्ति है।", &[Tag::HasSentenceTerminator]),
            mk_line("जारी", &[]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![
                ("वाक्य चलता है।", State::StandardProse),
                ("पूर्ण पंक्ति है। जारी", State::StandardProse)
            ]
        );
    }

    #[test]
    fn test_verse_block_returns_to_prose_and_reprocesses() {
        let mut generator = ParagraphGenerator::new();
        generator.process_line(mk_line("गद्य", &[]));
        generator.process_line(mk_line("श्लोक", &[Tag::Centered]));
        assert_eq!(generator.state(), State::VerseBlock);
        generator.process_line(mk_line("व्याख्या", &[Tag::Indented]));
        assert_eq!(generator.state(), State::StandardProse);
        assert_eq!(
            texts(&generator.flush()),
            vec![
                ("गद्य", State::StandardProse),
                ("श्लोक", State::VerseBlock),
                ("व्याख्या", State::StandardProse)
            ]
        );
    }

    #[test]
    fn test_verse_block_into_dialogue_chains_transitions() {
        let paragraphs = segment_lines(vec![
            mk_line("श्लोक", &[Tag::Centered]),
            mk_qa("प्रश्न: क्यों?", "प्रश्न:", &[]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![
                ("श्लोक", State::VerseBlock),
                ("प्रश्न: क्यों?", State::QaBlock)
            ]
        );
    }

    #[test]
    fn test_qa_block_collects_continuation_lines() {
        let paragraphs = segment_lines(vec![
            mk_qa("प्रश्न: क्या यह", "प्रश्न:", &[]),
            mk_line("सही है?", &[]),
            mk_qa("प्रश्न: और यह?", "प्रश्न:", &[]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![("प्रश्न: क्या यह सही है? प्रश्न: और यह?", State::QaBlock)]
        );
    }

    #[test]
    fn test_qa_speaker_change_splits_turns() {
        let paragraphs = segment_lines(vec![
            mk_qa("प्रश्न: क्यों?", "प्रश्न:", &[]),
            mk_qa("उत्तर: इसलिए।", "उत्तर:", &[]),
            mk_line("और आगे", &[]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![
                ("प्रश्न: क्यों?", State::QaBlock),
                ("उत्तर: इसलिए। और आगे", State::QaBlock)
            ]
        );
    }

    #[test]
    fn test_heading_ends_qa_block_and_is_reprocessed() {
        let paragraphs = segment_lines(vec![
            mk_qa("प्रश्न: क्यों?", "प्रश्न:", &[]),
            mk_line("★ अगला विषय", &[Tag::Heading]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![
                ("प्रश्न: क्यों?", State::QaBlock),
                ("★ अगला विषय", State::StandardProse)
            ]
        );
    }

    #[test]
    fn test_indented_non_qa_line_ends_qa_block() {
        let paragraphs = segment_lines(vec![
            mk_qa("उत्तर: हाँ", "उत्तर:", &[]),
            mk_line("नया अनुच्छेद", &[Tag::Indented]),
            mk_line("जारी", &[]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![
                ("उत्तर: हाँ", State::QaBlock),
                ("नया अनुच्छेद जारी", State::StandardProse)
            ]
        );
    }

    #[test]
    fn test_indented_qa_line_stays_in_qa_block() {
        let paragraphs = segment_lines(vec![
            mk_qa("प्रश्न: क्यों?", "प्रश्न:", &[]),
            mk_qa("प्रश्न: फिर?", "प्रश्न:", &[Tag::Indented]),
        ]);
        assert_eq!(
            texts(&paragraphs),
            vec![("प्रश्न: क्यों? प्रश्न: फिर?", State::QaBlock)]
        );
    }

    // A terminator in a dialogue is consumed: it closes the QA paragraph and the
    // switch back to prose must not evaluate it again.
    #[test]
    fn test_absolute_terminator_in_qa_is_consumed_not_reprocessed() {
        let mut generator = ParagraphGenerator::new();
        generator.process_line(mk_qa("उत्तर: जैसा कहा", "उत्तर:", &[]));
        generator.process_line(mk_line(
            "वैसा ही ॥ ३ ॥",
            &[Tag::AbsoluteTerminator, Tag::Indented],
        ));
        assert_eq!(generator.state(), State::StandardProse);
        assert_eq!(generator.paragraphs().len(), 1);
        assert_eq!(
            texts(&generator.flush()),
            vec![("उत्तर: जैसा कहा वैसा ही ॥ ३ ॥", State::QaBlock)]
        );
    }

    // Geometry-driven transitions re-evaluate the line: the centered line is the
    // first line of the verse block, not the last line of the prose paragraph.
    #[test]
    fn test_centered_line_in_prose_is_reprocessed_into_verse() {
        let mut generator = ParagraphGenerator::new();
        generator.process_line(mk_line("गद्य", &[]));
        generator.process_line(mk_line("श्लोक", &[Tag::Centered]));
        let paragraphs = generator.paragraphs().to_vec();
        assert_eq!(texts(&paragraphs), vec![("गद्य", State::StandardProse)]);
        assert_eq!(
            texts(&generator.flush()),
            vec![("गद्य", State::StandardProse), ("श्लोक", State::VerseBlock)]
        );
    }

    #[test]
    fn test_whitespace_only_buffer_is_dropped() {
        // Not tagged EMPTY on purpose: finalization itself must drop blank text.
        let paragraphs = segment_lines(vec![mk_line("   ", &[])]);
        assert!(paragraphs.is_empty());
    }

    #[test]
    fn test_line_numbers_recorded() {
        let mut first = mk_line("क", &[]);
        first.line_num = 7;
        let mut second = mk_line("ख", &[]);
        second.line_num = 9;
        let paragraphs = segment_lines(vec![first, second]);
        assert_eq!((paragraphs[0].start_line, paragraphs[0].end_line), (7, 9));
    }
}

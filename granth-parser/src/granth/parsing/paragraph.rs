//! Paragraph records and the segmenter states that type them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of the paragraph state machine, and the type of every paragraph it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    #[default]
    StandardProse,
    VerseBlock,
    QaBlock,
}

impl State {
    /// Separator used when joining the lines of one paragraph.
    pub fn line_separator(self) -> &'static str {
        match self {
            State::VerseBlock => "\n",
            State::StandardProse | State::QaBlock => " ",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::StandardProse => "STANDARD_PROSE",
            State::VerseBlock => "VERSE_BLOCK",
            State::QaBlock => "QA_BLOCK",
        };
        write!(f, "{}", name)
    }
}

/// A finalized paragraph. Never mutated; merge phases build new records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub page_num: u32,
    #[serde(rename = "type")]
    pub kind: State,
    pub start_line: u32,
    pub end_line: u32,
}

impl Paragraph {
    pub fn new(
        text: impl Into<String>,
        page_num: u32,
        kind: State,
        start_line: u32,
        end_line: u32,
    ) -> Self {
        Self {
            text: text.into(),
            page_num,
            kind,
            start_line,
            end_line,
        }
    }

    /// Combine a run of paragraphs into one of type `kind`.
    ///
    /// Page and start line come from the first entry, the end line from the last.
    /// Returns `None` for an empty run.
    pub fn combine(run: &[Paragraph], kind: State, separator: &str) -> Option<Paragraph> {
        let first = run.first()?;
        let last = run.last()?;
        let text = run
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(separator);
        Some(Paragraph::new(
            text,
            first.page_num,
            kind,
            first.start_line,
            last.end_line,
        ))
    }
}

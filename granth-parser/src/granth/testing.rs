//! Testing utilities
//!
//!     Scanned scripture is hard to fake convincingly: a made-up line is usually off in its
//!     geometry or its punctuation, and a test built on it ends up tuning the segmenter to
//!     the wrong thing. Tests therefore come in two kinds:
//!
//!         1. State machine and merge tests build lines with explicit tags via [factories],
//!            bypassing geometry entirely. The tags are the contract of the state machine.
//!         2. End to end tests build [`Document`]s with real page margins via
//!            [factories::mk_page] and let the classifier assign tags.
//!
//! [`Document`]: crate::granth::document::Document

pub mod factories {
    use crate::granth::config::PageMargins;
    use crate::granth::document::Page;
    use crate::granth::parsing::{Paragraph, State};
    use crate::granth::token::{Line, RawLine, Tag, TagSet};

    /// Left prose margin used by [`mk_page`].
    pub const LEFT_MARGIN: f64 = 100.0;
    /// Right prose margin used by [`mk_page`].
    pub const RIGHT_MARGIN: f64 = 900.0;

    /// A line on page 1 carrying exactly `tags`.
    pub fn mk_line(text: &str, tags: &[Tag]) -> Line {
        Line {
            text: text.to_string(),
            x_start: 0,
            x_end: 0,
            page_num: 1,
            line_num: 0,
            tags: tags.iter().copied().collect::<TagSet>(),
            speaker: None,
        }
    }

    /// A dialogue line: tagged QA with `speaker`, plus any extra `tags`.
    pub fn mk_qa(text: &str, speaker: &str, tags: &[Tag]) -> Line {
        let mut line = mk_line(text, tags);
        line.tags.insert(Tag::Qa);
        line.speaker = Some(speaker.to_string());
        line
    }

    pub fn mk_paragraph(text: &str, page_num: u32, kind: State) -> Paragraph {
        Paragraph::new(text, page_num, kind, 0, 0)
    }

    /// Geometry of a line laid out on a [`mk_page`] page.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Layout {
        /// Spans the full prose width.
        Full,
        /// Full width but ends well short of the right margin.
        Short,
        /// Indented on the left, reaching the right margin.
        Indented,
        /// Indented on both sides.
        Centered,
    }

    /// Raw page with margins 100..900 and lines numbered from 1.
    pub fn mk_page(page_num: u32, lines: &[(&str, Layout)]) -> Page {
        let raw = lines
            .iter()
            .enumerate()
            .map(|(i, (text, layout))| {
                let (x_start, x_end) = match layout {
                    Layout::Full => (100, 900),
                    Layout::Short => (100, 600),
                    Layout::Indented => (160, 900),
                    Layout::Centered => (300, 700),
                };
                RawLine::new(*text, x_start, x_end, i as u32 + 1)
            })
            .collect();
        Page::new(page_num, PageMargins::new(LEFT_MARGIN, RIGHT_MARGIN), raw)
    }
}

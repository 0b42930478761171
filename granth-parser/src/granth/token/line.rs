//! Line types for the segmentation pipeline
//!
//!     OCR hands us lines that already carry a position on the page, so there is no
//!     tokenization step: each raw line is normalized and then classified into exactly one
//!     [`Line`], which is consumed exactly once by the paragraph state machine.
//!
//!     In the real world a line is often more than one thing at a time. A dialogue line may
//!     also be indented, a numbered verse end also carries a sentence terminator. For this
//!     reason a line carries a set of tags rather than a single category, and the order in
//!     which the state machine checks them is what decides the outcome.
//!
//! Tags
//!
//!     These are the line tags:
//!
//!         - Centered: indented on the left and short of the right margin
//!         - Indented: indented on the left only (never set together with Centered)
//!         - NotRightJustified: stops short of the right prose margin
//!         - Empty: whitespace only; short-circuits every other tag
//!         - HeaderRegex: matches a configured running header/footer pattern
//!         - Qa: starts with a configured question or answer prefix
//!         - Heading: starts with a fixed heading marker (★, काव्य -, अर्थः ...)
//!         - HasSentenceTerminator: ends with a language sentence terminator
//!         - AbsoluteTerminator: ends with a numbered verse end (॥ १२ ॥)
//!
//!     See [classify](crate::granth::lexing::line_classification::LineClassifier::classify)
//!     for the classification logic.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A raw OCR line as produced by the extraction stage.
///
/// Geometry is optional on the wire: missing coordinates default to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawLine {
    pub text: String,
    #[serde(default)]
    pub x_start: i64,
    #[serde(default)]
    pub x_end: i64,
    #[serde(default)]
    pub line_num: u32,
}

impl RawLine {
    pub fn new(text: impl Into<String>, x_start: i64, x_end: i64, line_num: u32) -> Self {
        Self {
            text: text.into(),
            x_start,
            x_end,
            line_num,
        }
    }
}

/// A single classification mark on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Tag {
    Centered,
    Indented,
    NotRightJustified,
    Empty,
    HeaderRegex,
    Qa,
    Heading,
    HasSentenceTerminator,
    AbsoluteTerminator,
}

impl Tag {
    pub const ALL: [Tag; 9] = [
        Tag::Centered,
        Tag::Indented,
        Tag::NotRightJustified,
        Tag::Empty,
        Tag::HeaderRegex,
        Tag::Qa,
        Tag::Heading,
        Tag::HasSentenceTerminator,
        Tag::AbsoluteTerminator,
    ];

    fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tag::Centered => "CENTERED",
            Tag::Indented => "INDENTED",
            Tag::NotRightJustified => "NOT_RIGHT_JUSTIFIED",
            Tag::Empty => "EMPTY",
            Tag::HeaderRegex => "HEADER_REGEX",
            Tag::Qa => "QA",
            Tag::Heading => "HEADING",
            Tag::HasSentenceTerminator => "HAS_SENTENCE_TERMINATOR",
            Tag::AbsoluteTerminator => "ABSOLUTE_TERMINATOR",
        };
        write!(f, "{}", name)
    }
}

/// Fixed-size set of [`Tag`]s backed by a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TagSet(u16);

impl TagSet {
    pub const fn empty() -> Self {
        TagSet(0)
    }

    pub fn insert(&mut self, tag: Tag) {
        self.0 |= tag.bit();
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Tags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        Tag::ALL.into_iter().filter(move |tag| self.contains(*tag))
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<T: IntoIterator<Item = Tag>>(iter: T) -> Self {
        let mut set = TagSet::empty();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl<const N: usize> From<[Tag; N]> for TagSet {
    fn from(tags: [Tag; N]) -> Self {
        tags.into_iter().collect()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|tag| tag.to_string()).collect();
        write!(f, "{}", names.join("|"))
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for tag in self.iter() {
            seq.serialize_element(&tag)?;
        }
        seq.end()
    }
}

/// A classified line, ready for the paragraph state machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub text: String,
    pub x_start: i64,
    pub x_end: i64,
    pub page_num: u32,
    pub line_num: u32,
    pub tags: TagSet,
    /// The question/answer prefix that matched, when tagged [`Tag::Qa`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl Line {
    pub fn has(&self, tag: Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Lines that close the open paragraph and are then dropped.
    pub fn is_dropped(&self) -> bool {
        self.has(Tag::Empty) || self.has(Tag::HeaderRegex)
    }
}

//! Input model: the OCR lines of one document, page by page.

use crate::granth::config::PageMargins;
use crate::granth::token::RawLine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    pub page_num: u32,
    #[serde(flatten)]
    pub margins: PageMargins,
    #[serde(default)]
    pub lines: Vec<RawLine>,
}

impl Page {
    pub fn new(page_num: u32, margins: PageMargins, lines: Vec<RawLine>) -> Self {
        Self {
            page_num,
            margins,
            lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|page| page.lines.len()).sum()
    }
}

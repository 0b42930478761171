//! Plain text: paragraph texts in order, separated by the paragraph delimiter.

use super::registry::{FormatError, Formatter};
use crate::granth::parsing::Paragraph;

pub struct TextFormatter {
    delimiter: String,
}

impl TextFormatter {
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
        }
    }
}

impl Formatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn serialize(&self, paragraphs: &[Paragraph]) -> Result<String, FormatError> {
        let mut out = paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(&self.delimiter);
        if !out.is_empty() {
            out.push('\n');
        }
        Ok(out)
    }

    fn description(&self) -> &str {
        "Paragraph texts separated by the paragraph delimiter"
    }
}

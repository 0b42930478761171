//! JSON array of paragraph records.

use super::registry::{FormatError, Formatter};
use crate::granth::parsing::Paragraph;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, paragraphs: &[Paragraph]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(paragraphs)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Paragraph records with page, type and line span"
    }
}

//! Output helpers for the CLI: the YAML format, page files and line descriptions.

use granth_parser::granth::formats::{render_pages, FormatError, FormatRegistry, Formatter};
use granth_parser::granth::parsing::Paragraph;
use granth_parser::granth::token::Line;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// YAML list of paragraph records, same fields as the JSON format.
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, paragraphs: &[Paragraph]) -> Result<String, FormatError> {
        serde_yaml::to_string(paragraphs).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Paragraph records with page, type and line span, as YAML"
    }
}

/// Built-in formats plus YAML.
pub fn registry(delimiter: &str) -> FormatRegistry {
    let mut registry = FormatRegistry::with_defaults(delimiter);
    registry.register(YamlFormatter);
    registry
}

/// Write one `<stem>.page-<n>.txt` per page of `paragraphs` into `dir`.
pub fn write_pages(
    dir: &Path,
    input: &Path,
    paragraphs: &[Paragraph],
    delimiter: &str,
) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let mut written = Vec::new();
    for (page_num, text) in render_pages(paragraphs, delimiter) {
        let path = dir.join(format!("{}.page-{}.txt", stem, page_num));
        fs::write(&path, text)?;
        written.push(path);
    }
    Ok(written)
}

/// `page:line [TAGS] speaker text`, one classified line per row.
pub fn describe_line(line: &Line) -> String {
    let speaker = line
        .speaker
        .as_deref()
        .map(|s| format!(" ({})", s))
        .unwrap_or_default();
    format!(
        "{}:{}\t[{}]{}\t{}",
        line.page_num, line.line_num, line.tags, speaker, line.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use granth_parser::granth::parsing::State;
    use granth_parser::granth::testing::factories::{mk_line, mk_paragraph, mk_qa};
    use granth_parser::granth::token::Tag;

    #[test]
    fn test_registry_has_yaml() {
        let registry = registry("\n");
        assert_eq!(registry.list_formats(), vec!["json", "text", "yaml"]);
        let yaml = registry
            .serialize(&[mk_paragraph("पद", 3, State::VerseBlock)], "yaml")
            .unwrap();
        assert!(yaml.contains("type: VERSE_BLOCK"));
        assert!(yaml.contains("page_num: 3"));
    }

    #[test]
    fn test_write_pages_names_files_by_stem_and_page() {
        let dir = tempfile::tempdir().unwrap();
        let paragraphs = vec![
            mk_paragraph("क", 1, State::StandardProse),
            mk_paragraph("ख", 1, State::StandardProse),
            mk_paragraph("ग", 4, State::QaBlock),
        ];
        let written =
            write_pages(dir.path(), Path::new("in/ch01.json"), &paragraphs, "\n--\n").unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("ch01.page-1.txt"),
                dir.path().join("ch01.page-4.txt"),
            ]
        );
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), "क\n--\nख");
    }

    #[test]
    fn test_describe_line() {
        let line = mk_line("राम।", &[Tag::HasSentenceTerminator]);
        assert_eq!(describe_line(&line), "1:0\t[HAS_SENTENCE_TERMINATOR]\tराम।");
        let qa = mk_qa("प्रश्न: क्या?", "प्रश्न:", &[]);
        assert_eq!(describe_line(&qa), "1:0\t[QA] (प्रश्न:)\tप्रश्न: क्या?");
    }
}

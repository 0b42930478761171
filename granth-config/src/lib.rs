//! Shared configuration loader for the granth toolchain.
//!
//! `defaults/granth.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Scanned books are organized in folders, and a
//! folder's `granth.toml` applies to every document below it, while a
//! `<stem>.granth.toml` beside a document applies to that document only.
//! [`Loader::for_document`] layers all of them over the defaults, closest last,
//! before deserializing into [`GranthConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use granth_parser::granth::config::ScanConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/granth.default.toml");

/// Name of the folder-level configuration file.
pub const FOLDER_CONFIG_NAME: &str = "granth.toml";

/// Suffix of the per-document configuration file, after the document's stem.
pub const DOCUMENT_CONFIG_SUFFIX: &str = ".granth.toml";

/// Top-level configuration consumed by granth applications.
#[derive(Debug, Clone, Deserialize)]
pub struct GranthConfig {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// Controls how segmented paragraphs are written out.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub paragraph_delimiter: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Loader for one document: every `granth.toml` from `root` down to the
    /// document's folder, then the document's own `<stem>.granth.toml`.
    ///
    /// A document outside `root` only picks up its own folder's files.
    pub fn for_document(root: impl AsRef<Path>, document: impl AsRef<Path>) -> Self {
        let document = document.as_ref();
        let mut loader = Self::new();
        for dir in config_dirs(root.as_ref(), document) {
            loader = loader.with_optional_file(dir.join(FOLDER_CONFIG_NAME));
        }
        if let Some(path) = document_config_path(document) {
            loader = loader.with_optional_file(path);
        }
        loader
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "layering config file");
        let source = File::from(path).format(FileFormat::Toml).required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.is_file() {
            tracing::debug!(path = %path.display(), "layering config file");
        }
        let source = File::from(path).format(FileFormat::Toml).required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GranthConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Folders whose `granth.toml` applies to `document`, outermost first.
fn config_dirs(root: &Path, document: &Path) -> Vec<PathBuf> {
    let Some(dir) = document.parent() else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = dir
        .ancestors()
        .take_while(|ancestor| ancestor.starts_with(root))
        .map(Path::to_path_buf)
        .collect();
    if dirs.is_empty() {
        dirs.push(dir.to_path_buf());
    }
    dirs.reverse();
    dirs
}

/// `<dir>/<stem>.granth.toml` for `document`.
pub fn document_config_path(document: &Path) -> Option<PathBuf> {
    let stem = document.file_stem()?.to_string_lossy();
    let dir = document.parent().unwrap_or_else(|| Path::new(""));
    Some(dir.join(format!("{}{}", stem, DOCUMENT_CONFIG_SUFFIX)))
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GranthConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use granth_parser::granth::lexing::Language;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.scan.language, Language::Hindi);
        assert!(config.scan.header_regex.is_empty());
        assert!(config.scan.question_prefix.is_empty());
        assert!(config.scan.dialogue_prefixes().contains(&"प्रश्न:"));
        assert!(config.scan.typo_list.is_empty());
        assert_eq!(config.output.paragraph_delimiter, "\n\n----\n\n");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("scan.language", "gujarati")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.scan.language, Language::Gujarati);
        assert!(config.scan.dialogue_prefixes().contains(&"પ્રશ્ન:"));
    }

    #[test]
    fn layers_folders_then_document() {
        let root = tempfile::tempdir().expect("tempdir");
        let book = root.path().join("book");
        fs::create_dir_all(&book).unwrap();
        fs::write(
            root.path().join(FOLDER_CONFIG_NAME),
            "[scan]\nlanguage = \"gujarati\"\nheader_regex = [\"^root$\"]\n",
        )
        .unwrap();
        fs::write(
            book.join(FOLDER_CONFIG_NAME),
            "[scan]\nheader_regex = [\"^book$\"]\n",
        )
        .unwrap();
        fs::write(
            book.join("ch01.granth.toml"),
            "[scan]\ntypo_list = [[\"ક\", \"ખ\"]]\n",
        )
        .unwrap();

        let config = Loader::for_document(root.path(), book.join("ch01.json"))
            .build()
            .expect("config to build");
        // Inherited from the root folder.
        assert_eq!(config.scan.language, Language::Gujarati);
        // Closest folder wins and replaces the list.
        assert_eq!(config.scan.header_regex, vec!["^book$"]);
        assert_eq!(
            config.scan.typo_list,
            vec![("ક".to_string(), "ખ".to_string())]
        );

        // A sibling document does not see ch01's own file.
        let sibling = Loader::for_document(root.path(), book.join("ch02.json"))
            .build()
            .expect("config to build");
        assert!(sibling.scan.typo_list.is_empty());
    }

    #[test]
    fn document_outside_root_uses_own_folder() {
        let root = tempfile::tempdir().expect("tempdir");
        let elsewhere = tempfile::tempdir().expect("tempdir");
        fs::write(
            elsewhere.path().join(FOLDER_CONFIG_NAME),
            "[output]\nparagraph_delimiter = \"\\n\"\n",
        )
        .unwrap();
        let config = Loader::for_document(root.path(), elsewhere.path().join("a.json"))
            .build()
            .expect("config to build");
        assert_eq!(config.output.paragraph_delimiter, "\n");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(Loader::new()
            .with_file(dir.path().join("absent.toml"))
            .build()
            .is_err());
    }

    #[test]
    fn document_config_path_uses_stem() {
        assert_eq!(
            document_config_path(Path::new("books/ch01.json")),
            Some(PathBuf::from("books/ch01.granth.toml"))
        );
    }
}

//! Command-line interface for granth
//!
//! Segments OCR output of scanned Hindi and Gujarati scripture into paragraphs, and exposes
//! the normalization and classification steps on their own for inspecting a scan.
//!
//! Usage:
//!   granth segment `<input>...` [--format text|json|yaml] [--out-dir `<dir>`]
//!   granth normalize `<input>` [--language hindi|gujarati]
//!   granth classify `<input>`
//!
//! Every command resolves its configuration per input: the embedded defaults, then each
//! `granth.toml` from `--root` down to the input's folder, then `<stem>.granth.toml`, then
//! `--config`, then `--language`.

mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use granth_config::{GranthConfig, Loader};
use granth_parser::granth::document::Document;
use granth_parser::granth::formats::FormatError;
use granth_parser::granth::lexing::{Language, LineLexer, Normalizer};
use granth_parser::granth::parsing::Paragraph;
use granth_parser::granth::pipeline::Segmenter;
use granth_parser::granth::transforms::TransformError;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "granth", version)]
#[command(about = "Paragraph segmentation for OCR'd Hindi and Gujarati scripture")]
struct Cli {
    /// Log progress to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where an input's configuration comes from
#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// Folder whose granth.toml files apply to the inputs (default: each input's folder)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Extra TOML file layered over the folder and document files
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source language, overriding the configured one
    #[arg(short, long)]
    language: Option<Language>,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment OCR documents (JSON) into paragraphs
    Segment {
        /// Documents to segment; several are processed in parallel
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text", value_parser = ["text", "json", "yaml"])]
        format: String,

        /// Write one `<stem>.page-<n>.txt` per page here instead of printing
        #[arg(long)]
        out_dir: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the normalized text of a plain text file
    Normalize {
        input: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print every line of an OCR document (JSON) with its tags
    Classify {
        input: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: invalid document: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("configuration error: {0}")]
    Config(#[from] granth_config::ConfigError),
    #[error(transparent)]
    Scan(#[from] granth_parser::granth::config::ConfigError),
    #[error(transparent)]
    Segment(#[from] TransformError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Segment {
            inputs,
            format,
            out_dir,
            config,
        } => handle_segment_command(&inputs, &format, out_dir.as_deref(), &config),
        Commands::Normalize { input, config } => handle_normalize_command(&input, &config),
        Commands::Classify { input, config } => handle_classify_command(&input, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Resolve the layered configuration for one input file
fn load_config(input: &Path, args: &ConfigArgs) -> Result<GranthConfig, CliError> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let mut loader = Loader::for_document(root, input);
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }
    if let Some(language) = args.language {
        loader = loader.set_override("scan.language", language.to_string())?;
    }
    Ok(loader.build()?)
}

fn read_input(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_document(path: &Path) -> Result<Document, CliError> {
    let json = read_input(path)?;
    Document::from_json(&json).map_err(|source| CliError::Document {
        path: path.to_path_buf(),
        source,
    })
}

/// Segment one input with its own configuration
fn segment_input(
    input: &Path,
    args: &ConfigArgs,
) -> Result<(GranthConfig, Vec<Paragraph>), CliError> {
    let config = load_config(input, args)?;
    let document = read_document(input)?;
    let segmenter = Segmenter::new(&config.scan)?;
    let paragraphs = segmenter.segment(document)?;
    Ok((config, paragraphs))
}

/// Handle the segment command
fn handle_segment_command(
    inputs: &[PathBuf],
    format: &str,
    out_dir: Option<&Path>,
    args: &ConfigArgs,
) -> Result<(), CliError> {
    let results: Vec<_> = inputs
        .par_iter()
        .map(|input| segment_input(input, args))
        .collect();

    let show_names = inputs.len() > 1;
    for (input, result) in inputs.iter().zip(results) {
        let (config, paragraphs) = result?;
        let delimiter = &config.output.paragraph_delimiter;

        if let Some(dir) = out_dir {
            let written = output::write_pages(dir, input, &paragraphs, delimiter).map_err(
                |source| CliError::Io {
                    path: dir.to_path_buf(),
                    source,
                },
            )?;
            tracing::info!(input = %input.display(), files = written.len(), "wrote pages");
            continue;
        }

        let formatted = output::registry(delimiter).serialize(&paragraphs, format)?;
        if show_names {
            println!("==> {} <==", input.display());
        }
        print!("{}", formatted);
        if !formatted.is_empty() && !formatted.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

/// Handle the normalize command
fn handle_normalize_command(input: &Path, args: &ConfigArgs) -> Result<(), CliError> {
    let config = load_config(input, args)?;
    let text = read_input(input)?;
    let normalized = Normalizer::from_config(&config.scan).normalize(&text);
    println!("{}", normalized);
    Ok(())
}

/// Handle the classify command
fn handle_classify_command(input: &Path, args: &ConfigArgs) -> Result<(), CliError> {
    let config = load_config(input, args)?;
    let document = read_document(input)?;
    let lexer = LineLexer::new(&config.scan)?;
    for line in lexer.lex(&document) {
        println!("{}", output::describe_line(&line));
    }
    Ok(())
}

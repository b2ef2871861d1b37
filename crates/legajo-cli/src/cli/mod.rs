//! CLI command definitions and dispatch for the `legajo` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod document;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use legajo_types::document::DocumentKind;

/// Analyze cadastral and notarial documents with Gemini.
#[derive(Parser)]
#[command(name = "legajo", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a document and wait until it is active, printing its handle.
    Ingest {
        /// Path to the PDF or image to upload.
        file: PathBuf,

        /// MIME type; guessed from the file extension when omitted.
        #[arg(long)]
        mime: Option<String>,
    },

    /// Upload a document and extract its structured fields.
    Analyze {
        /// Path to the PDF or image to analyze.
        file: PathBuf,

        /// MIME type; guessed from the file extension when omitted.
        #[arg(long)]
        mime: Option<String>,

        /// Document kind: propiedad or gravamen.
        #[arg(long, default_value = "propiedad", value_parser = parse_kind)]
        kind: DocumentKind,

        /// Custom extraction prompt, replacing the kind's default.
        #[arg(long)]
        prompt: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn parse_kind(s: &str) -> Result<DocumentKind, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "legajo", "analyze", "escritura.pdf", "--kind", "gravamen", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Analyze { kind, file, .. } => {
                assert_eq!(kind, DocumentKind::Gravamen);
                assert_eq!(file, PathBuf::from("escritura.pdf"));
            }
            _ => panic!("expected Analyze"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["legajo", "analyze", "a.pdf", "--kind", "urbano"]).is_err());
    }
}

//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Load configuration from this file
//! - `--format <text|json>`: Output format
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::OutputFormat;

/// metagate - Gate publishing on type-specific content metadata
#[derive(Parser, Debug)]
#[command(name = "mg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format (overrides the configured default)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List content types that declare metadata fields
    Types,

    /// Show the settings-panel fields for a content type
    #[command(after_help = "\
EXAMPLES:
    # Declared fields for events
    mg fields events

    # Current values and visibility for a saved record
    mg fields advocacy --record meta.json")]
    Fields {
        /// Content type slug (e.g. post, advocacy, chapters, events)
        content_type: String,

        /// Metadata record (JSON object) to show values from
        #[arg(long, value_name = "FILE")]
        record: Option<PathBuf>,
    },

    /// Validate a metadata record against its content type
    #[command(
        long_about = "Validate a metadata record against its content type.\n\n\
            Prints the pre-publish warnings for the record. Exits with status 0 \
            when the record may be published and 2 when publishing would be \
            blocked. Unknown content types always validate.",
        after_help = "\
EXAMPLES:
    mg validate post meta.json
    echo '{\"excerpt\": \"\"}' | mg validate post -
    mg validate events meta.json --format json"
    )]
    Validate {
        /// Content type slug
        content_type: String,

        /// Metadata record (JSON object), or '-' for stdin
        record: PathBuf,
    },

    /// Replay an editing session and report publish-lock transitions
    #[command(after_help = "\
SESSION FILE:
    {
      \"initial\": { \"excerpt\": \"\" },
      \"edits\": [ { \"key\": \"excerpt\", \"value\": \"Hello\" } ]
    }")]
    Replay {
        /// Content type slug
        content_type: String,

        /// Session file (JSON), or '-' for stdin
        session: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_validate_with_global_flags() {
        let cli = Cli::try_parse_from(["mg", "validate", "post", "-", "--format", "json", "-q"])
            .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Command::Validate {
                content_type,
                record,
            } => {
                assert_eq!(content_type, "post");
                assert_eq!(record, PathBuf::from("-"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn fields_record_is_optional() {
        let cli = Cli::try_parse_from(["mg", "fields", "events"]).unwrap();
        assert!(matches!(cli.command, Command::Fields { record: None, .. }));
    }
}

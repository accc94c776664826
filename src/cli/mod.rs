//! cli
//!
//! Command-line interface layer for metagate.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and initialise logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It reads records from disk and hands them to the
//! library: [`crate::engine`] for validation, [`crate::session`] for
//! replaying edits through the publish guard.

pub mod args;
pub mod commands;

pub use args::Cli;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::{Config, OutputFormat};
use crate::core::schema::SchemaRegistry;
use crate::ui::output::{self, Verbosity};

/// Everything a command handler needs.
#[derive(Debug)]
pub struct Context {
    /// Field registry, built once at start-up.
    pub registry: SchemaRegistry,
    /// Loaded configuration.
    pub config: Config,
    /// Effective output format.
    pub format: OutputFormat,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let loaded = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    for warning in &loaded.warnings {
        output::warn(&warning.message, verbosity);
    }
    if let Some(path) = loaded.config.loaded_from() {
        output::debug(format!("config loaded from {}", path.display()), verbosity);
    }

    let registry = SchemaRegistry::builtin().context("built-in field registry is invalid")?;

    let ctx = Context {
        registry,
        format: cli.format.unwrap_or_else(|| loaded.config.format()),
        config: loaded.config,
        verbosity,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects debug level for
/// this crate and everything else stays at warnings.
fn init_logging(debug: bool) {
    let default = if debug { "metagate=debug" } else { "metagate=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Reads and parses its inputs
//! 2. Calls the library to validate or replay
//! 3. Formats and displays output
//!
//! Handlers return the process exit code. Errors are reserved for bad
//! inputs and host faults; an invalid record is a normal outcome reported
//! through the exit code.

mod fields;
mod replay;
mod types;
mod validate;

pub use fields::fields;
pub use replay::{replay, ReplayScript};
pub use types::types;
pub use validate::validate;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;

use super::args::Command;
use super::Context;

/// Exit status when a record would block publishing.
pub const EXIT_INVALID: u8 = 2;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Types => types::types(ctx),
        Command::Fields {
            content_type,
            record,
        } => fields::fields(ctx, &content_type, record.as_deref()),
        Command::Validate {
            content_type,
            record,
        } => validate::validate(ctx, &content_type, &record),
        Command::Replay {
            content_type,
            session,
        } => replay::replay(ctx, &content_type, &session),
    }
}

/// Read JSON from a file, or from stdin when the path is `-`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?
    };

    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse '{}' as JSON", path.display()))
}

//! replay command - Drive an editing session from a script
//!
//! The script holds the record as it was when opened and the field edits
//! in the order the user made them. Each edit goes through the same
//! session the editor uses, so the output shows exactly when publishing
//! would have been locked and unlocked.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use super::{read_json, EXIT_INVALID};
use crate::cli::Context;
use crate::core::config::OutputFormat;
use crate::core::types::{ContentType, FieldValue, LockToken, MetadataRecord};
use crate::guard::host::{HostError, PublishLock};
use crate::guard::LockState;
use crate::session::EditingSession;
use crate::ui::output::{self, Verbosity};

/// An editing session to replay.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    /// Record when the editor opened.
    #[serde(default)]
    pub initial: MetadataRecord,
    /// Field edits in order.
    #[serde(default)]
    pub edits: Vec<Edit>,
    /// Whether the user may edit the record.
    #[serde(default = "default_can_edit")]
    pub can_edit: bool,
}

fn default_can_edit() -> bool {
    true
}

/// A single field edit.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Edit {
    pub key: String,
    pub value: FieldValue,
}

#[derive(Debug, Serialize)]
struct Step {
    key: String,
    value: FieldValue,
    state: LockState,
    changed: bool,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    content_type: ContentType,
    initial_state: LockState,
    steps: Vec<Step>,
    final_state: LockState,
    warnings: Vec<String>,
}

/// Publish lock that reports to the terminal.
struct ConsoleLock {
    verbosity: Verbosity,
    echo: bool,
}

impl PublishLock for ConsoleLock {
    fn acquire(&mut self, token: &LockToken) -> Result<(), HostError> {
        if self.echo {
            output::print(format!("  lock acquired ({})", token), self.verbosity);
        }
        Ok(())
    }

    fn release(&mut self, token: &LockToken) -> Result<(), HostError> {
        if self.echo {
            output::print(format!("  lock released ({})", token), self.verbosity);
        }
        Ok(())
    }
}

/// Replay a session script and report lock transitions.
pub fn replay(ctx: &Context, content_type: &str, script: &Path) -> Result<ExitCode> {
    let content_type = ContentType::from_slug(content_type);
    let script: ReplayScript = read_json(script)?;
    let text = ctx.format == OutputFormat::Text;

    let lock = ConsoleLock {
        verbosity: ctx.verbosity,
        echo: text,
    };
    let mut session = EditingSession::open(
        &ctx.registry,
        content_type.clone(),
        script.initial,
        lock,
        script.can_edit,
        ctx.config.lock_token(),
    )
    .context("failed to open editing session")?;

    let initial_state = session.lock_state();
    if text {
        output::print(format!("opened {} ({})", content_type, initial_state), ctx.verbosity);
    }

    let mut steps = Vec::with_capacity(script.edits.len());
    for (i, edit) in script.edits.into_iter().enumerate() {
        let before = session.lock_state();
        if text {
            output::print(
                format!("[{}] {} = {}", i + 1, edit.key, edit.value),
                ctx.verbosity,
            );
        }
        session
            .set_field(&edit.key, edit.value.clone())
            .with_context(|| format!("edit {} ({}) failed", i + 1, edit.key))?;

        let state = session.lock_state();
        steps.push(Step {
            key: edit.key,
            value: edit.value,
            state,
            changed: state != before,
        });
    }

    let final_state = session.lock_state();
    let warnings = session.warnings();

    match ctx.format {
        OutputFormat::Json => output::json(&ReplayReport {
            content_type,
            initial_state,
            steps,
            final_state,
            warnings,
        })?,
        OutputFormat::Text => {
            output::print(format!("final: {}", final_state), ctx.verbosity);
            if !warnings.is_empty() {
                output::print(warnings.join("\n"), ctx.verbosity);
            }
        }
    }

    Ok(match final_state {
        LockState::Unlocked => ExitCode::SUCCESS,
        LockState::Locked => ExitCode::from(EXIT_INVALID),
    })
}

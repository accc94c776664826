//! validate command - Check a record the way the pre-publish panel does

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use super::{read_json, EXIT_INVALID};
use crate::cli::Context;
use crate::core::config::OutputFormat;
use crate::core::types::{ContentType, MetadataRecord};
use crate::engine;
use crate::ui::output;
use crate::ui::warnings::present;

#[derive(Serialize)]
struct ValidateReport<'a> {
    content_type: &'a ContentType,
    is_valid: bool,
    reasons: &'a [String],
    messages: &'a [String],
}

/// Validate a record file and report the presenter output.
pub fn validate(ctx: &Context, content_type: &str, record: &Path) -> Result<ExitCode> {
    let content_type = ContentType::from_slug(content_type);
    let record: MetadataRecord = read_json(record)?;

    let result = engine::validate_with(&ctx.registry, &content_type, &record);
    let messages = present(&result, &content_type);

    match ctx.format {
        OutputFormat::Json => output::json(&ValidateReport {
            content_type: &content_type,
            is_valid: result.is_valid,
            reasons: &result.reasons,
            messages: &messages,
        })?,
        OutputFormat::Text if result.is_valid => {
            output::print(format!("{}: ready to publish", content_type), ctx.verbosity);
        }
        OutputFormat::Text => {
            output::print(messages.join("\n"), ctx.verbosity);
            if ctx.config.show_reasons() {
                output::print(output::bullets(&result.reasons), ctx.verbosity);
            }
        }
    }

    Ok(if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    })
}

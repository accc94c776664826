//! fields command - Show the settings-panel inputs for a content type
//!
//! With `--record`, values come from the record and visibility follows its
//! toggles; otherwise every input shows its empty value.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use super::read_json;
use crate::cli::Context;
use crate::core::config::OutputFormat;
use crate::core::types::{ContentType, MetadataRecord};
use crate::ui::output;
use crate::ui::panel::SettingsPanel;

/// Print the ordered inputs for a content type.
pub fn fields(ctx: &Context, content_type: &str, record: Option<&Path>) -> Result<ExitCode> {
    let content_type = ContentType::from_slug(content_type);
    let record: MetadataRecord = match record {
        Some(path) => read_json(path)?,
        None => MetadataRecord::new(),
    };

    if !ctx.registry.is_registered(&content_type) {
        output::warn(
            format!("'{}' declares no metadata fields", content_type),
            ctx.verbosity,
        );
    }

    let inputs = SettingsPanel::render(&ctx.registry, &content_type, &record);

    match ctx.format {
        OutputFormat::Json => output::json(&inputs)?,
        OutputFormat::Text => {
            for input in &inputs {
                let hidden = if input.visible { "" } else { " [hidden]" };
                output::print(
                    format!(
                        "{} ({}, {}): {}{}\n    {}",
                        input.key, input.value_type, input.control, input.value, hidden, input.label
                    ),
                    ctx.verbosity,
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

//! types command - List content types that declare metadata fields

use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use crate::cli::Context;
use crate::core::config::OutputFormat;
use crate::ui::output;

#[derive(Serialize)]
struct TypeSummary<'a> {
    content_type: &'a str,
    fields: usize,
}

/// List registered content types with their field counts.
pub fn types(ctx: &Context) -> Result<ExitCode> {
    let summaries: Vec<TypeSummary<'_>> = ctx
        .registry
        .content_types()
        .map(|ty| TypeSummary {
            content_type: ty.slug(),
            fields: ctx.registry.fields_or_empty(ty).len(),
        })
        .collect();

    match ctx.format {
        OutputFormat::Json => output::json(&summaries)?,
        OutputFormat::Text => {
            let lines: Vec<String> = summaries
                .iter()
                .map(|s| format!("{} ({} fields)", s.content_type, s.fields))
                .collect();
            output::print(lines.join("\n"), ctx.verbosity);
        }
    }

    Ok(ExitCode::SUCCESS)
}

// censor/src/ui/summary.rs
//! Human-readable and JSON summaries of a censor run.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use censor_core::{CensorReport, MatchPolicy, Scope};

/// Everything the JSON summary records about a run.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub path: Option<&'a str>,
    pub scope: Scope,
    pub policy: MatchPolicy,
    pub engine: &'a str,
    #[serde(flatten)]
    pub report: &'a CensorReport,
}

/// Writes the removal summary, coloured when `supports_color` is set.
pub fn print_summary<W: Write>(
    summary: &RunSummary<'_>,
    writer: &mut W,
    supports_color: bool,
) -> Result<()> {
    let header = "--- Censor Summary ---";
    if supports_color {
        writeln!(writer, "{}", header.yellow().bold())?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    let report = summary.report;
    if !report.in_scope {
        writeln!(
            writer,
            "Path '{}' is not a target; payload passed through unchanged.",
            summary.path.unwrap_or("<none>")
        )?;
        return Ok(());
    }

    if report.removed.is_empty() {
        writeln!(writer, "No console lines found ({} line(s) checked).", report.lines_in)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Removed {} of {} line(s) using the '{}' engine:",
        report.removed.len(),
        report.lines_in,
        summary.engine
    )?;
    for removed in &report.removed {
        let text = removed.text.trim();
        if supports_color {
            writeln!(writer, "  {:>5}: {}", removed.line_number.cyan(), text.red())?;
        } else {
            writeln!(writer, "  {:>5}: {}", removed.line_number, text)?;
        }
    }
    Ok(())
}

/// Writes the summary as pretty JSON to `path`.
pub fn write_json_summary(summary: &RunSummary<'_>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON summary to {}", path.display()))
}

//! Output formatting for ownership reports.

mod json;
mod text;

use crate::models::OwnershipReport;
use anyhow::{bail, Result};

/// Render a report in the requested format.
pub fn render(report: &OwnershipReport, format: &str) -> Result<String> {
    match format {
        "text" => text::render(report),
        "json" => json::render(report),
        other => bail!("Unknown output format '{}' (expected text or json)", other),
    }
}

//! JSON reporter
//!
//! Outputs the full report as pretty-printed JSON for piping to jq or further
//! processing.

use super::Report;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

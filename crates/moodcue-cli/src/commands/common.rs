//! Shared file-reading helpers for the subcommands.

use std::path::Path;

use moodcue_core::{RawCandidateRecord, RawEventRecord};

/// Read calendar events from a JSON file.
///
/// Accepts either the collaborator's `{"events": [...]}` envelope or a bare
/// array of records.
pub fn read_events_file(path: &Path) -> Result<Vec<RawEventRecord>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let records = match value.get("events") {
        Some(events) => serde_json::from_value(events.clone())?,
        None => serde_json::from_value(value)?,
    };
    Ok(records)
}

/// Read candidate catalog rows from a JSON array file.
pub fn read_catalog_file(
    path: &Path,
) -> Result<Vec<RawCandidateRecord>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

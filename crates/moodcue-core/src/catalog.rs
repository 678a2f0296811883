//! Candidate catalog boundary types, mood filtering, and ranking.
//!
//! The ranking collaborator exports loosely-shaped rows (numbers may arrive
//! as numeric strings, mood tags as one comma-joined field). This module
//! validates them into typed [`Candidate`]s, then filters by mood-tag
//! intersection and orders by relevance score. Duration fitting is *not*
//! done here -- that belongs to the slot packer, so a catalog is ranked
//! once and packed many times against different windows.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RecordError;
use crate::mood::MoodSet;

/// Raw catalog row as exported by the ranking collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCandidateRecord {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<serde_json::Value>,
    #[serde(default)]
    pub score: Option<serde_json::Value>,
    /// Comma-joined, case-insensitive mood tags.
    #[serde(default)]
    pub mood_tags: Option<String>,
}

/// A validated, rankable catalog item. Read-only once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub item_id: String,
    pub title: String,
    pub duration_minutes: i64,
    pub score: f64,
    pub mood_tags: BTreeSet<String>,
}

impl Candidate {
    /// Validate a raw row.
    ///
    /// # Errors
    /// Returns a [`RecordError`] when `item_id` is absent or a numeric
    /// field is neither a finite number nor a numeric string.
    pub fn try_from_raw(raw: &RawCandidateRecord) -> Result<Self, RecordError> {
        let item_id = raw
            .item_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(RecordError::MissingField { field: "item_id" })?;
        let duration = numeric_field("duration_minutes", raw.duration_minutes.as_ref())?;
        let score = numeric_field("score", raw.score.as_ref())?;

        let mood_tags = raw
            .mood_tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(Self {
            item_id,
            title: raw.title.clone().unwrap_or_default(),
            duration_minutes: duration as i64,
            score,
            mood_tags,
        })
    }
}

/// Accept a JSON number or a numeric string, rejecting everything else.
fn numeric_field(
    field: &'static str,
    value: Option<&serde_json::Value>,
) -> Result<f64, RecordError> {
    let value = value.ok_or(RecordError::MissingField { field })?;
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| RecordError::BadNumber {
            field,
            value: value.to_string(),
        })
}

/// Validate raw rows into candidates, dropping malformed ones.
///
/// Returns the surviving candidates (catalog order preserved) together with
/// the number of rows skipped. One bad row never aborts the catalog.
pub fn parse_catalog(rows: &[RawCandidateRecord]) -> (Vec<Candidate>, usize) {
    let mut catalog = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for row in rows {
        match Candidate::try_from_raw(row) {
            Ok(candidate) => catalog.push(candidate),
            Err(err) => {
                warn!(
                    "skipping malformed catalog row '{}': {err}",
                    row.item_id.as_deref().unwrap_or("<no id>")
                );
                skipped += 1;
            }
        }
    }
    (catalog, skipped)
}

/// Keep candidates whose tags intersect the active moods, best score first.
///
/// An empty mood set retains nothing: with no signal there is nothing to
/// recommend on. Ties keep catalog order (stable sort, no secondary key).
pub fn filter_and_rank(catalog: Vec<Candidate>, moods: &MoodSet) -> Vec<Candidate> {
    if moods.is_empty() {
        return Vec::new();
    }
    let mut kept: Vec<Candidate> = catalog
        .into_iter()
        .filter(|candidate| moods.intersects(&candidate.mood_tags))
        .collect();
    kept.sort_by(|a, b| b.score.total_cmp(&a.score));
    kept
}

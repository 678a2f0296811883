//! Calendar event boundary types.
//!
//! The calendar collaborator returns loosely-shaped JSON records; this
//! module validates them into typed [`CalendarEvent`]s at the boundary.
//! One bad record never aborts a computation -- it is dropped with a
//! warning and counted, per the row-level recovery policy.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RecordError;

/// Raw event record as returned by the calendar collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEventRecord {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A validated calendar event.
///
/// Timestamps keep the offset they arrived with: the availability engine
/// reads calendar dates from them as given, while interval comparisons use
/// the instant. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Validate a raw record.
    ///
    /// # Errors
    /// Returns a [`RecordError`] when `start`/`end` are absent, unparsable,
    /// or do not satisfy `end > start` (zero-length events contribute
    /// nothing and are treated as malformed).
    pub fn try_from_raw(raw: &RawEventRecord) -> Result<Self, RecordError> {
        let start_text = raw
            .start
            .as_deref()
            .ok_or(RecordError::MissingField { field: "start" })?;
        let end_text = raw
            .end
            .as_deref()
            .ok_or(RecordError::MissingField { field: "end" })?;

        let start = parse_timestamp(start_text)?;
        let end = parse_timestamp(end_text)?;
        if end <= start {
            return Err(RecordError::InvalidTimeRange { start, end });
        }

        Ok(Self {
            summary: raw.summary.clone().unwrap_or_default(),
            start,
            end,
            location: raw.location.clone(),
            description: raw.description.clone(),
        })
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    /// Duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Offset-aware values ('Z' or explicit offset) keep their offset, naive
/// datetimes are assumed UTC, and bare dates (all-day events) become
/// midnight UTC.
fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, RecordError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Utc
            .from_utc_datetime(&date.and_time(NaiveTime::MIN))
            .fixed_offset());
    }
    Err(RecordError::BadTimestamp {
        value: value.to_string(),
    })
}

/// Validate raw records into events, dropping malformed rows.
///
/// Returns the surviving events together with the number of rows skipped.
pub fn parse_events(rows: &[RawEventRecord]) -> (Vec<CalendarEvent>, usize) {
    let mut events = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for row in rows {
        match CalendarEvent::try_from_raw(row) {
            Ok(event) => events.push(event),
            Err(err) => {
                warn!(
                    "skipping malformed event record '{}': {err}",
                    row.summary.as_deref().unwrap_or("<untitled>")
                );
                skipped += 1;
            }
        }
    }
    (events, skipped)
}

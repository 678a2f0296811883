//! Free-slot computation inside daily waking hours.
//!
//! Converts a set of possibly overlapping, multi-day calendar events into
//! an ordered list of free windows bounded by per-day waking hours. The
//! waking bounds are interpreted in a configured reference timezone and
//! converted to UTC for every comparison; output display strings are
//! rendered back in the reference zone with forced millisecond precision.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calendar::CalendarEvent;

/// Gaps of one minute or less are noise, not free time.
const MIN_SLOT_MINUTES: f64 = 1.0;

/// Waking-hour bounds and reference timezone for day windows.
///
/// The defaults match the reference deployment: 07:00 to 23:59:59.999,
/// Indian Standard Time. IST carries no daylight saving, so a fixed UTC
/// offset fully describes the zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    /// Start of the waking window, "HH:MM" in the reference zone.
    #[serde(default = "default_wake_up")]
    pub wake_up: String,
    /// Close of the waking window, "HH:MM:SS.mmm" in the reference zone.
    #[serde(default = "default_day_close")]
    pub day_close: String,
    /// Reference zone as minutes east of UTC.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

fn default_wake_up() -> String {
    "07:00".to_string()
}
fn default_day_close() -> String {
    "23:59:59.999".to_string()
}
fn default_utc_offset_minutes() -> i32 {
    330
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            wake_up: default_wake_up(),
            day_close: default_day_close(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl AvailabilityConfig {
    /// Reference zone offset. An out-of-range configuration falls back to
    /// UTC; the accompanying sweep will already have produced no slots.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
    }

    fn bounds(&self) -> Option<DayBounds> {
        let wake = parse_wall_time(&self.wake_up)?;
        let close = parse_wall_time(&self.day_close)?;
        let offset = FixedOffset::east_opt(self.utc_offset_minutes.checked_mul(60)?)?;
        Some(DayBounds {
            wake,
            close,
            offset,
        })
    }
}

/// Parsed per-day window bounds.
struct DayBounds {
    wake: NaiveTime,
    close: NaiveTime,
    offset: FixedOffset,
}

/// Parse "HH:MM", "HH:MM:SS", or "HH:MM:SS.mmm" wall-clock times.
fn parse_wall_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S%.3f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// A maximal free interval within one day's waking window.
///
/// Created by the sweep and never mutated afterwards. Instants are UTC;
/// display strings come out in the reference zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FreeSlot {
    /// Duration in fractional minutes.
    pub fn duration_minutes(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 60_000.0
    }

    /// Slot start in the reference zone, milliseconds forced to `.000`.
    pub fn start_display(&self, offset: FixedOffset) -> String {
        format_display(self.start, offset, false)
    }

    /// Slot end in the reference zone, milliseconds forced to `.999`.
    pub fn end_display(&self, offset: FixedOffset) -> String {
        format_display(self.end, offset, true)
    }
}

/// Reference-zone ISO string with forced millisecond precision.
///
/// Starts truncate to the whole second (`.000`), ends saturate to `.999`.
/// Callers compare these strings exactly; the convention is part of the
/// output contract.
pub(crate) fn format_display(instant: DateTime<Utc>, offset: FixedOffset, is_end: bool) -> String {
    let local = instant.with_timezone(&offset);
    let nanos = if is_end { 999_000_000 } else { 0 };
    let local = local.with_nanosecond(nanos).unwrap_or(local);
    local.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

/// Compute chronologically ordered free slots for the date range spanned
/// by `events`.
///
/// An empty event list yields an empty result: a calendar with no events
/// is a valid empty-schedule case, not an error. Events are expected to be
/// boundary-validated (`end > start`); ordering among events with equal
/// start times is unspecified beyond sort stability.
pub fn compute_free_slots(events: &[CalendarEvent], config: &AvailabilityConfig) -> Vec<FreeSlot> {
    if events.is_empty() {
        return Vec::new();
    }
    let Some(bounds) = config.bounds() else {
        warn!(
            "invalid availability bounds (wake_up='{}', day_close='{}', offset={}m), no slots computed",
            config.wake_up, config.day_close, config.utc_offset_minutes
        );
        return Vec::new();
    };

    let mut ordered: Vec<&CalendarEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.start);

    // Calendar dates are read from each event's own timestamp as given;
    // only interval comparisons convert to UTC.
    let first_day = ordered[0].start.date_naive();
    let last_day = ordered
        .iter()
        .map(|event| event.end.date_naive())
        .max()
        .unwrap_or(first_day);

    let mut slots = Vec::new();
    let mut day = first_day;
    while day <= last_day {
        sweep_day(&ordered, day, &bounds, &mut slots);
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }
    slots
}

/// Sweep one day's waking window, appending every gap above the noise
/// threshold.
///
/// Events overlapping the window are clamped to it; a multi-day event is
/// clamped independently on each day it overlaps. The cursor advances
/// monotonically (`max`), so fully overlapping or duplicate events collapse
/// without an explicit merge step.
fn sweep_day(
    ordered: &[&CalendarEvent],
    day: NaiveDate,
    bounds: &DayBounds,
    slots: &mut Vec<FreeSlot>,
) {
    let day_start = wall_time_to_utc(day, bounds.wake, bounds.offset);
    let day_end = wall_time_to_utc(day, bounds.close, bounds.offset);
    if day_end <= day_start {
        return;
    }

    let mut cursor = day_start;
    for event in ordered {
        let start = event.start_utc();
        let end = event.end_utc();
        if start >= day_end || end <= day_start {
            continue;
        }
        let busy_start = start.max(day_start);
        let busy_end = end.min(day_end);
        if busy_start > cursor {
            push_slot(slots, cursor, busy_start);
        }
        cursor = cursor.max(busy_end);
    }
    if cursor < day_end {
        push_slot(slots, cursor, day_end);
    }
}

fn push_slot(slots: &mut Vec<FreeSlot>, start: DateTime<Utc>, end: DateTime<Utc>) {
    let slot = FreeSlot { start, end };
    if slot.duration_minutes() > MIN_SLOT_MINUTES {
        slots.push(slot);
    }
}

/// Interpret a wall-clock time on `day` in the reference zone, as a UTC
/// instant.
fn wall_time_to_utc(day: NaiveDate, time: NaiveTime, offset: FixedOffset) -> DateTime<Utc> {
    let local = day.and_time(time);
    Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(offset.local_minus_utc()))))
}

//! End-to-end recommendation assembly.
//!
//! One engine call is a pure, single-pass computation over materialized
//! input snapshots: mood labels, raw calendar events, raw catalog rows, and
//! an injected clock. All fetching happens before this runs (see
//! [`crate::sources`]); there is no partial-progress state to roll back.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::{compute_free_slots, AvailabilityConfig, FreeSlot};
use crate::calendar::{parse_events, RawEventRecord};
use crate::catalog::{filter_and_rank, parse_catalog, RawCandidateRecord};
use crate::error::CoreError;
use crate::mood::{aggregate, MoodSet};
use crate::packer::{format_minutes, pack, PackedWindow};

/// Raw mood labels as read from the three signal collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalReadings {
    pub environment_mood: Option<String>,
    pub wearable_mood: Option<String>,
    pub voice_mood: Option<String>,
}

/// Display summary of one computed free slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub start: String,
    pub end: String,
    pub duration: String,
}

/// Build display summaries for computed slots.
pub fn summarize_slots(slots: &[FreeSlot], offset: FixedOffset) -> Vec<SlotSummary> {
    slots
        .iter()
        .map(|slot| SlotSummary {
            start: slot.start_display(offset),
            end: slot.end_display(offset),
            duration: format_minutes(slot.duration_minutes()),
        })
        .collect()
}

/// Output of one aggregation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub run_id: Uuid,
    pub moods: MoodSet,
    pub free_slots: Vec<SlotSummary>,
    /// Total free time over every computed slot, `"<H>h <M>m"`.
    pub total_free: String,
    pub windows: Vec<PackedWindow>,
    /// Malformed event rows dropped at the boundary.
    pub skipped_events: usize,
    /// Malformed catalog rows dropped at the boundary.
    pub skipped_candidates: usize,
}

/// Orchestrates one full aggregation run.
pub struct RecommendationEngine {
    config: AvailabilityConfig,
}

impl RecommendationEngine {
    pub fn new(config: AvailabilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AvailabilityConfig {
        &self.config
    }

    /// Run the pipeline: aggregate moods, sweep the calendar into free
    /// slots, rank the catalog, pack.
    ///
    /// # Errors
    /// Fails only on a missing mood signal. Malformed event or catalog rows
    /// are skipped and surface in the skip counts; an empty calendar is a
    /// valid empty result.
    pub fn recommend(
        &self,
        signals: &SignalReadings,
        raw_events: &[RawEventRecord],
        raw_catalog: &[RawCandidateRecord],
        now: DateTime<Utc>,
    ) -> Result<Recommendation, CoreError> {
        let moods = aggregate(
            signals.environment_mood.as_deref(),
            signals.wearable_mood.as_deref(),
            signals.voice_mood.as_deref(),
        )?;

        let (events, skipped_events) = parse_events(raw_events);
        let slots = compute_free_slots(&events, &self.config);

        let (catalog, skipped_candidates) = parse_catalog(raw_catalog);
        let ranked = filter_and_rank(catalog, &moods);

        let offset = self.config.offset();
        let total_minutes: f64 = slots.iter().map(FreeSlot::duration_minutes).sum();
        let windows = pack(&ranked, &slots, now, offset);

        Ok(Recommendation {
            run_id: Uuid::new_v4(),
            moods,
            free_slots: summarize_slots(&slots, offset),
            total_free: format_minutes(total_minutes),
            windows,
            skipped_events,
            skipped_candidates,
        })
    }
}

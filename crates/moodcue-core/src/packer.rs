//! Packing ranked candidates into free slots.
//!
//! Greedy fit-all, not a knapsack: each future slot receives every ranked
//! candidate whose runtime fits its free minutes, in rank order. Item ids
//! form one strictly increasing sequence across all windows of a run so
//! clients can deduplicate across windows.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::availability::FreeSlot;
use crate::catalog::Candidate;

/// One recommended item inside a packed window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedItem {
    /// Global sequence number across every window of a single run.
    pub id: u32,
    pub item_id: String,
    pub title: String,
    pub duration_minutes: i64,
    /// Relevance score, rounded to two decimal places for output.
    pub score: f64,
}

/// A free window with the ranked candidates that fit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedWindow {
    /// 1-based chronological position among the kept (future) slots.
    pub slot_id: usize,
    pub start_time: String,
    pub end_time: String,
    pub free_minutes: i64,
    pub item_count: usize,
    pub items: Vec<PackedItem>,
}

/// Split fractional minutes into rounded (hours, minutes) display parts.
///
/// Negative inputs clamp to zero; a rounded minute component of 60 carries
/// into the hour.
fn hm_parts(minutes: f64) -> (i64, i64) {
    let minutes = minutes.max(0.0);
    let hours = (minutes / 60.0) as i64;
    let rem = (minutes % 60.0).round() as i64;
    if rem == 60 {
        (hours + 1, 0)
    } else {
        (hours, rem)
    }
}

/// Render a duration in the `"<H>h <M>m"` human form.
pub fn format_minutes(minutes: f64) -> String {
    let (hours, mins) = hm_parts(minutes);
    format!("{hours}h {mins}m")
}

/// Whole free minutes of a slot, consistent with [`format_minutes`].
pub fn whole_minutes(minutes: f64) -> i64 {
    let (hours, mins) = hm_parts(minutes);
    hours * 60 + mins
}

/// Pack ranked candidates into every slot still ending in the future.
///
/// `now` is injected by the caller so runs are reproducible against a fixed
/// clock. Slots may arrive from a serialization boundary, so they are
/// re-sorted chronologically before packing. A slot with no fitting
/// candidate still emits a window with an empty item list; callers must not
/// treat that as an error. Candidates without a title are skipped.
pub fn pack(
    ranked: &[Candidate],
    slots: &[FreeSlot],
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Vec<PackedWindow> {
    let mut upcoming: Vec<&FreeSlot> = slots.iter().filter(|slot| slot.end > now).collect();
    upcoming.sort_by_key(|slot| slot.start);

    let mut windows = Vec::with_capacity(upcoming.len());
    // Explicit accumulator threaded through the loop, never shared state.
    let mut next_id: u32 = 1;

    for (index, slot) in upcoming.iter().enumerate() {
        let free_minutes = whole_minutes(slot.duration_minutes());
        let mut items = Vec::new();
        for candidate in ranked {
            if candidate.duration_minutes > free_minutes || candidate.title.is_empty() {
                continue;
            }
            items.push(PackedItem {
                id: next_id,
                item_id: candidate.item_id.clone(),
                title: candidate.title.clone(),
                duration_minutes: candidate.duration_minutes,
                score: (candidate.score * 100.0).round() / 100.0,
            });
            next_id += 1;
        }
        windows.push(PackedWindow {
            slot_id: index + 1,
            start_time: slot.start_display(offset),
            end_time: slot.end_display(offset),
            free_minutes,
            item_count: items.len(),
            items,
        });
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    fn slot(day: u32, start_h: u32, end_h: u32) -> FreeSlot {
        FreeSlot {
            start: Utc.with_ymd_and_hms(2025, 7, day, start_h, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 7, day, end_h, 0, 0).unwrap(),
        }
    }

    fn candidate(id: &str, duration: i64, score: f64) -> Candidate {
        Candidate {
            item_id: id.to_string(),
            title: format!("Title {id}"),
            duration_minutes: duration,
            score,
            mood_tags: BTreeSet::new(),
        }
    }

    fn noon(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn oversized_candidates_never_fit() {
        // 30 free minutes, runtimes [45, 20, 10]: 45 is excluded, rank
        // order preserved for the rest.
        let half_hour = FreeSlot {
            start: Utc.with_ymd_and_hms(2025, 7, 2, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 7, 2, 9, 30, 0).unwrap(),
        };
        let ranked = vec![
            candidate("a", 45, 0.9),
            candidate("b", 20, 0.8),
            candidate("c", 10, 0.7),
        ];
        let windows = pack(&ranked, &[half_hour], noon(1), ist());
        let durations: Vec<i64> = windows[0].items.iter().map(|i| i.duration_minutes).collect();
        assert_eq!(durations, vec![20, 10]);
    }

    #[test]
    fn ids_increase_across_windows() {
        let ranked = vec![candidate("a", 30, 0.9), candidate("b", 45, 0.8)];
        let windows = pack(&ranked, &[slot(2, 9, 11), slot(2, 14, 16), slot(3, 9, 10)], noon(1), ist());
        let ids: Vec<u32> = windows
            .iter()
            .flat_map(|w| w.items.iter().map(|i| i.id))
            .collect();
        assert_eq!(ids, (1..=ids.len() as u32).collect::<Vec<_>>());
        assert_eq!(windows[0].slot_id, 1);
        assert_eq!(windows[1].slot_id, 2);
        assert_eq!(windows[2].slot_id, 3);
    }

    #[test]
    fn past_slots_are_discarded() {
        let windows = pack(
            &[candidate("a", 30, 0.9)],
            &[slot(1, 8, 10), slot(2, 9, 11)],
            noon(1),
            ist(),
        );
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].slot_id, 1);
        assert!(windows[0].start_time.starts_with("2025-07-02"));
    }

    #[test]
    fn slot_straddling_now_is_kept() {
        let windows = pack(&[candidate("a", 30, 0.9)], &[slot(1, 11, 13)], noon(1), ist());
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn unsorted_slots_are_reordered() {
        let windows = pack(
            &[candidate("a", 30, 0.9)],
            &[slot(3, 9, 10), slot(2, 9, 10)],
            noon(1),
            ist(),
        );
        assert!(windows[0].start_time < windows[1].start_time);
        assert_eq!(windows[0].slot_id, 1);
    }

    #[test]
    fn empty_window_is_still_emitted() {
        let windows = pack(&[candidate("a", 500, 0.9)], &[slot(2, 9, 10)], noon(1), ist());
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].item_count, 0);
        assert!(windows[0].items.is_empty());
    }

    #[test]
    fn untitled_candidates_are_skipped() {
        let mut untitled = candidate("a", 30, 0.9);
        untitled.title.clear();
        let windows = pack(&[untitled, candidate("b", 30, 0.8)], &[slot(2, 9, 11)], noon(1), ist());
        assert_eq!(windows[0].item_count, 1);
        assert_eq!(windows[0].items[0].item_id, "b");
        // The skipped candidate consumes no id.
        assert_eq!(windows[0].items[0].id, 1);
    }

    #[test]
    fn scores_round_to_two_decimals() {
        let windows = pack(&[candidate("a", 30, 0.87345)], &[slot(2, 9, 11)], noon(1), ist());
        assert_eq!(windows[0].items[0].score, 0.87);
    }

    #[test]
    fn window_timestamps_use_display_convention() {
        let windows = pack(&[], &[slot(2, 9, 11)], noon(1), ist());
        assert_eq!(windows[0].start_time, "2025-07-02T14:30:00.000+05:30");
        assert_eq!(windows[0].end_time, "2025-07-02T16:30:00.999+05:30");
        assert_eq!(windows[0].free_minutes, 120);
    }

    #[test]
    fn human_duration_form() {
        assert_eq!(format_minutes(125.0), "2h 5m");
        assert_eq!(format_minutes(45.0), "0h 45m");
        assert_eq!(format_minutes(-10.0), "0h 0m");
        // Rounded minutes carry into hours.
        assert_eq!(format_minutes(119.7), "2h 0m");
        assert_eq!(format_minutes(839.99998), "14h 0m");
    }

    #[test]
    fn whole_minutes_matches_human_form() {
        assert_eq!(whole_minutes(839.99998), 840);
        assert_eq!(whole_minutes(120.0), 120);
        assert_eq!(whole_minutes(-5.0), 0);
    }
}

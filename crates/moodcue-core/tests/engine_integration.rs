//! End-to-end engine tests over JSON fixtures, with a fixed clock.

use chrono::{TimeZone, Utc};
use moodcue_core::{
    AvailabilityConfig, RawCandidateRecord, RawEventRecord, RecommendationEngine, SignalReadings,
};

fn signals() -> SignalReadings {
    SignalReadings {
        environment_mood: Some("Happy".to_string()),
        wearable_mood: Some("stressed".to_string()),
        voice_mood: Some("happy".to_string()),
    }
}

fn fixture_events() -> Vec<RawEventRecord> {
    serde_json::from_str(
        r#"[
            {"summary": "Standup", "start": "2025-07-01T09:00:00+05:30", "end": "2025-07-01T10:00:00+05:30"},
            {"summary": "Review", "start": "2025-07-01T09:30:00+05:30", "end": "2025-07-01T11:00:00+05:30"},
            {"summary": "Broken", "start": "not-a-date", "end": "2025-07-01T12:00:00+05:30"},
            {"summary": "No end", "start": "2025-07-01T15:00:00+05:30"}
        ]"#,
    )
    .unwrap()
}

fn fixture_catalog() -> Vec<RawCandidateRecord> {
    serde_json::from_str(
        r#"[
            {"item_id": "m1", "title": "Long Epic", "duration_minutes": 200, "score": 0.91, "mood_tags": "happy,energetic"},
            {"item_id": "m2", "title": "Short Comedy", "duration_minutes": "95.0", "score": "0.87345", "mood_tags": "Happy"},
            {"item_id": "m3", "title": "Weeper", "duration_minutes": 100, "score": 0.99, "mood_tags": "sad"},
            {"item_id": "m4", "title": "", "duration_minutes": 30, "score": 0.85, "mood_tags": "stressed"},
            {"item_id": "m5", "title": "Broken Row", "duration_minutes": "n/a", "score": 0.5, "mood_tags": "happy"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn full_pipeline_with_fixed_clock() {
    let engine = RecommendationEngine::new(AvailabilityConfig::default());
    // 2025-07-01 06:00 IST: the whole day is still ahead.
    let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 30, 0).unwrap();

    let out = engine
        .recommend(&signals(), &fixture_events(), &fixture_catalog(), now)
        .unwrap();

    assert_eq!(out.skipped_events, 2);
    assert_eq!(out.skipped_candidates, 1);

    // Overlapping events collapse into one 09:00-11:00 busy span, leaving
    // the morning gap and the rest of the day.
    assert_eq!(out.free_slots.len(), 2);
    assert_eq!(out.free_slots[0].start, "2025-07-01T07:00:00.000+05:30");
    assert_eq!(out.free_slots[0].end, "2025-07-01T09:00:00.999+05:30");
    assert_eq!(out.free_slots[0].duration, "2h 0m");
    assert_eq!(out.free_slots[1].start, "2025-07-01T11:00:00.000+05:30");
    assert_eq!(out.free_slots[1].end, "2025-07-01T23:59:59.999+05:30");

    assert_eq!(out.windows.len(), 2);
    let first = &out.windows[0];
    let second = &out.windows[1];
    assert_eq!(first.slot_id, 1);
    assert_eq!(second.slot_id, 2);

    // 120-minute morning gap: only the 95-minute title fits. The sad-tagged
    // and untitled candidates never appear; the 200-minute epic fits the
    // evening only.
    assert_eq!(first.free_minutes, 120);
    assert_eq!(first.item_count, 1);
    assert_eq!(first.items[0].item_id, "m2");
    assert_eq!(first.items[0].score, 0.87);

    let evening_ids: Vec<&str> = second.items.iter().map(|i| i.item_id.as_str()).collect();
    assert_eq!(evening_ids, vec!["m1", "m2"]);

    // One strictly increasing global id sequence across all windows.
    let ids: Vec<u32> = out
        .windows
        .iter()
        .flat_map(|w| w.items.iter().map(|i| i.id))
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn afternoon_clock_drops_the_morning_window() {
    let engine = RecommendationEngine::new(AvailabilityConfig::default());
    // 2025-07-01 12:00 IST: the morning gap has already closed.
    let now = Utc.with_ymd_and_hms(2025, 7, 1, 6, 30, 0).unwrap();

    let out = engine
        .recommend(&signals(), &fixture_events(), &fixture_catalog(), now)
        .unwrap();

    // Both computed slots are still reported...
    assert_eq!(out.free_slots.len(), 2);
    // ...but only the evening window is packed, renumbered from 1.
    assert_eq!(out.windows.len(), 1);
    assert_eq!(out.windows[0].slot_id, 1);
    assert_eq!(out.windows[0].start_time, "2025-07-01T11:00:00.000+05:30");
    assert_eq!(out.windows[0].items[0].id, 1);
}

#[test]
fn output_serializes_with_contract_keys() {
    let engine = RecommendationEngine::new(AvailabilityConfig::default());
    let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 30, 0).unwrap();
    let out = engine
        .recommend(&signals(), &fixture_events(), &fixture_catalog(), now)
        .unwrap();

    let json = serde_json::to_value(&out).unwrap();
    let window = &json["windows"][0];
    for key in ["slot_id", "start_time", "end_time", "free_minutes", "item_count", "items"] {
        assert!(window.get(key).is_some(), "missing key {key}");
    }
    let item = &window["items"][0];
    for key in ["id", "item_id", "title", "duration_minutes", "score"] {
        assert!(item.get(key).is_some(), "missing key {key}");
    }
}

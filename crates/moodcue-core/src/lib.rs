//! # Moodcue Core Library
//!
//! Core business logic for Moodcue, a mood-aware media recommender: mood
//! signals from three sources merge into a relevance filter, calendar
//! events are swept into per-day free windows inside configured waking
//! hours, and ranked catalog candidates are packed into each upcoming
//! window with one stable global id sequence.
//!
//! ## Architecture
//!
//! - **Mood Aggregator** ([`mood`]): merges the environment, wearable, and
//!   voice labels; all three are required
//! - **Availability Engine** ([`availability`]): waking-hour day windows in
//!   a fixed reference zone and the free-slot sweep
//! - **Catalog** ([`catalog`]): boundary validation, mood-tag filtering,
//!   score ranking
//! - **Slot Packer** ([`packer`]): duration-fit packing of ranked
//!   candidates into future slots
//! - **Sources** ([`sources`]): reqwest clients for the collaborator
//!   services, fetched concurrently
//!
//! The core is a pure, single-pass computation over immutable input
//! snapshots; all I/O lives in [`sources`] and completes before an engine
//! run. `now` is always injected, never read from a system clock inside
//! the computation.

pub mod availability;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod mood;
pub mod packer;
pub mod sources;

pub use availability::{compute_free_slots, AvailabilityConfig, FreeSlot};
pub use calendar::{parse_events, CalendarEvent, RawEventRecord};
pub use catalog::{filter_and_rank, parse_catalog, Candidate, RawCandidateRecord};
pub use config::Config;
pub use engine::{
    summarize_slots, Recommendation, RecommendationEngine, SignalReadings, SlotSummary,
};
pub use error::{ConfigError, CoreError, RecordError, SignalError, SourceError};
pub use mood::{aggregate, MoodSet, SignalKind};
pub use packer::{format_minutes, pack, PackedItem, PackedWindow};
pub use sources::{SignalSnapshot, SourceClient, SourcesConfig};

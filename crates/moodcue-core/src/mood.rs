//! Mood signal aggregation.
//!
//! Merges the labels reported by the environment classifier, the wearable
//! classifier, and the speech-emotion model into one lowercase set used as
//! the relevance filter for candidate selection. All three sources are
//! required; the aggregator never substitutes a default for a missing one.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SignalError;

/// One of the three required mood signal sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Environment,
    Wearable,
    Voice,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "environment_mood",
            Self::Wearable => "wearable_mood",
            Self::Voice => "voice_mood",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of active mood labels for one aggregation run.
///
/// Holds 0-3 lowercase labels (one per source, duplicates collapse).
/// Labels outside the known vocabulary pass through opaquely; the observed
/// upstream set is `neutral, stressed, energetic, relaxed, sad, happy,
/// angry, fear, disgust, ps`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSet(BTreeSet<String>);

impl MoodSet {
    /// Build a set from arbitrary labels, lowercasing each.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            labels
                .into_iter()
                .map(|label| label.as_ref().trim().to_lowercase())
                .filter(|label| !label.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(&label.trim().to_lowercase())
    }

    /// True when any of `tags` is an active mood.
    pub fn intersects(&self, tags: &BTreeSet<String>) -> bool {
        tags.iter().any(|tag| self.0.contains(tag))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Merge the three signal labels into a [`MoodSet`].
///
/// Every source is required: a `None` aborts the whole aggregation with a
/// [`SignalError::Missing`] naming the absent source, and no partial set is
/// produced. Callers that want to proceed on partial data must decide that
/// above this function.
pub fn aggregate(
    environment: Option<&str>,
    wearable: Option<&str>,
    voice: Option<&str>,
) -> Result<MoodSet, SignalError> {
    let environment = environment.ok_or(SignalError::Missing {
        signal: SignalKind::Environment,
    })?;
    let wearable = wearable.ok_or(SignalError::Missing {
        signal: SignalKind::Wearable,
    })?;
    let voice = voice.ok_or(SignalError::Missing {
        signal: SignalKind::Voice,
    })?;

    Ok(MoodSet::from_labels([environment, wearable, voice]))
}

//! HTTP clients for the mood and calendar collaborators.
//!
//! The core computation never fetches anything itself; these clients
//! materialize the collaborator outputs (single mood labels, raw event
//! records) before an engine run. The four fetches are independent of each
//! other and are issued concurrently by [`SourceClient::fetch_snapshot`].
//! Timeout and retry policy stay with the caller.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::calendar::RawEventRecord;
use crate::error::SourceError;

/// Collaborator endpoints, joined against `base_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_environment_path")]
    pub environment_path: String,
    #[serde(default = "default_wearable_path")]
    pub wearable_path: String,
    #[serde(default = "default_voice_path")]
    pub voice_path: String,
    #[serde(default = "default_calendar_path")]
    pub calendar_path: String,
    /// How many days ahead the calendar collaborator is asked to cover.
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_environment_path() -> String {
    "/predict-mood".to_string()
}
fn default_wearable_path() -> String {
    "/trigger/smartwatch_prediction".to_string()
}
fn default_voice_path() -> String {
    "/trigger/voice".to_string()
}
fn default_calendar_path() -> String {
    "/trigger/calendar".to_string()
}
fn default_days_ahead() -> u32 {
    9
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            environment_path: default_environment_path(),
            wearable_path: default_wearable_path(),
            voice_path: default_voice_path(),
            calendar_path: default_calendar_path(),
            days_ahead: default_days_ahead(),
        }
    }
}

/// All collaborator outputs for one aggregation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSnapshot {
    pub environment_mood: String,
    pub wearable_mood: String,
    pub voice_mood: String,
    pub events: Vec<RawEventRecord>,
}

/// The environment and wearable services answer with `predicted_mood`, the
/// speech-emotion service with `predicted_emotion`.
#[derive(Debug, Deserialize)]
struct MoodResponse {
    #[serde(default)]
    predicted_mood: Option<String>,
    #[serde(default)]
    predicted_emotion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    events: Vec<RawEventRecord>,
}

/// Async client over the collaborator services.
pub struct SourceClient {
    http: reqwest::Client,
    config: SourcesConfig,
}

impl SourceClient {
    pub fn new(config: SourcesConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, service: &'static str, path: &str) -> Result<Url, SourceError> {
        Url::parse(&self.config.base_url)
            .and_then(|base| base.join(path))
            .map_err(|err| SourceError::InvalidEndpoint {
                service,
                message: err.to_string(),
            })
    }

    async fn fetch_mood(&self, service: &'static str, path: &str) -> Result<String, SourceError> {
        let url = self.endpoint(service, path)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| SourceError::Upstream { service, source })?;
        let body: MoodResponse = response
            .json()
            .await
            .map_err(|source| SourceError::Upstream { service, source })?;
        body.predicted_mood
            .or(body.predicted_emotion)
            .ok_or(SourceError::BadPayload {
                service,
                message: "no mood label in response".to_string(),
            })
    }

    pub async fn fetch_environment_mood(&self) -> Result<String, SourceError> {
        self.fetch_mood("environment", &self.config.environment_path)
            .await
    }

    pub async fn fetch_wearable_mood(&self) -> Result<String, SourceError> {
        self.fetch_mood("wearable", &self.config.wearable_path).await
    }

    pub async fn fetch_voice_mood(&self) -> Result<String, SourceError> {
        self.fetch_mood("voice", &self.config.voice_path).await
    }

    /// Fetch the raw event listing for the configured horizon.
    pub async fn fetch_calendar_events(&self) -> Result<Vec<RawEventRecord>, SourceError> {
        let service = "calendar";
        let mut url = self.endpoint(service, &self.config.calendar_path)?;
        url.query_pairs_mut()
            .append_pair("days_ahead", &self.config.days_ahead.to_string());
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| SourceError::Upstream { service, source })?;
        let body: EventsResponse = response
            .json()
            .await
            .map_err(|source| SourceError::Upstream { service, source })?;
        Ok(body.events)
    }

    /// Fetch all four collaborators concurrently.
    pub async fn fetch_snapshot(&self) -> Result<SignalSnapshot, SourceError> {
        let (environment_mood, wearable_mood, voice_mood, events) = tokio::try_join!(
            self.fetch_environment_mood(),
            self.fetch_wearable_mood(),
            self.fetch_voice_mood(),
            self.fetch_calendar_events(),
        )?;
        Ok(SignalSnapshot {
            environment_mood,
            wearable_mood,
            voice_mood,
            events,
        })
    }
}

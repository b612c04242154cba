//! Where stress metrics come from.
//!
//! [`LocalMetrics`] runs the analyzer in-process; [`RemoteMetricsClient`]
//! posts the task list to an analyzer service. Both sit behind
//! [`MetricsSource`]. [`MetricsTracker`] keeps the latest snapshot when
//! requests overlap: only the most recently started request may replace it,
//! and a failed request leaves the previous snapshot in place.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CoreError, MetricsServiceError};
use crate::preferences::Preferences;
use crate::stats::{StressMetrics, WorkloadAnalyzer};
use crate::storage::MetricsConfig;
use crate::task::Task;

/// Anything that can turn a task list into a metrics snapshot.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Short name for logs ("local", "remote").
    fn name(&self) -> &str;

    async fn fetch(
        &self,
        tasks: &[Task],
        preferences: &Preferences,
    ) -> Result<StressMetrics, CoreError>;
}

/// In-process analyzer.
#[derive(Debug, Clone, Default)]
pub struct LocalMetrics {
    analyzer: WorkloadAnalyzer,
}

impl LocalMetrics {
    pub fn new(analyzer: WorkloadAnalyzer) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl MetricsSource for LocalMetrics {
    fn name(&self) -> &str {
        "local"
    }

    async fn fetch(
        &self,
        tasks: &[Task],
        preferences: &Preferences,
    ) -> Result<StressMetrics, CoreError> {
        Ok(self.analyzer.analyze(tasks, preferences))
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    tasks: &'a [Task],
    preferences: &'a Preferences,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for a remote analyzer endpoint.
pub struct RemoteMetricsClient {
    endpoint: Url,
    http_client: Client,
}

impl RemoteMetricsClient {
    /// Create a client for `endpoint` with a request timeout.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, MetricsServiceError> {
        let endpoint = Url::parse(endpoint).map_err(|e| MetricsServiceError::InvalidUrl {
            url: endpoint.to_string(),
            message: e.to_string(),
        })?;
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            http_client,
        })
    }

    /// Client for the configured service, or `None` when no URL is set.
    pub fn from_config(config: &MetricsConfig) -> Result<Option<Self>, MetricsServiceError> {
        config
            .service_url
            .as_deref()
            .map(|url| Self::new(url, config.timeout()))
            .transpose()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST `{tasks, preferences}` and decode the metrics snapshot.
    ///
    /// # Errors
    /// Transport failures, non-success statuses (with the service's `error`
    /// message when present) and undecodable bodies.
    pub async fn analyze(
        &self,
        tasks: &[Task],
        preferences: &Preferences,
    ) -> Result<StressMetrics, MetricsServiceError> {
        tracing::debug!(endpoint = %self.endpoint, count = tasks.len(), "requesting remote metrics");

        let resp = self
            .http_client
            .post(self.endpoint.clone())
            .json(&AnalyzeRequest { tasks, preferences })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| body.trim().to_string());
            return Err(MetricsServiceError::Status {
                code: status.as_u16(),
                message,
            });
        }

        if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(&body) {
            return Err(MetricsServiceError::Status {
                code: status.as_u16(),
                message: error,
            });
        }

        serde_json::from_str(&body).map_err(|e| MetricsServiceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MetricsSource for RemoteMetricsClient {
    fn name(&self) -> &str {
        "remote"
    }

    async fn fetch(
        &self,
        tasks: &[Task],
        preferences: &Preferences,
    ) -> Result<StressMetrics, CoreError> {
        Ok(self.analyze(tasks, preferences).await?)
    }
}

/// Stamp handed out when a metrics request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[derive(Debug, Default)]
struct TrackerState {
    issued: u64,
    applied: Option<u64>,
    latest: Option<StressMetrics>,
}

/// Latest-wins holder for the metrics snapshot.
#[derive(Debug, Default)]
pub struct MetricsTracker {
    state: Mutex<TrackerState>,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a request; its result only counts if no later one has started.
    pub fn begin(&self) -> Generation {
        let mut state = self.lock();
        state.issued += 1;
        Generation(state.issued)
    }

    /// Offer a finished result. Returns whether it became the snapshot.
    pub fn complete(
        &self,
        generation: Generation,
        result: Result<StressMetrics, CoreError>,
    ) -> bool {
        let mut state = self.lock();
        if generation.0 != state.issued {
            tracing::debug!(
                generation = generation.0,
                latest = state.issued,
                "discarding superseded metrics result"
            );
            return false;
        }

        match result {
            Ok(metrics) => {
                state.latest = Some(metrics);
                state.applied = Some(generation.0);
                true
            }
            Err(e) => {
                tracing::warn!(
                    has_previous = state.latest.is_some(),
                    "metrics refresh failed, keeping previous snapshot: {e}"
                );
                false
            }
        }
    }

    /// Current snapshot, possibly stale.
    pub fn latest(&self) -> Option<StressMetrics> {
        self.lock().latest.clone()
    }

    /// Generation of the current snapshot.
    pub fn applied(&self) -> Option<Generation> {
        self.lock().applied.map(Generation)
    }

    /// Fetch from `source` and offer the result; returns the snapshot afterwards.
    pub async fn refresh(
        &self,
        source: &dyn MetricsSource,
        tasks: &[Task],
        preferences: &Preferences,
    ) -> Option<StressMetrics> {
        let generation = self.begin();
        let result = source.fetch(tasks, preferences).await;
        if self.complete(generation, result) {
            tracing::debug!(source = source.name(), generation = generation.0, "metrics updated");
        }
        self.latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(busy: f64) -> StressMetrics {
        StressMetrics {
            busy_score: busy,
            ..StressMetrics::default()
        }
    }

    #[test]
    fn later_request_wins_regardless_of_arrival() {
        let tracker = MetricsTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(tracker.complete(second, Ok(metrics(20.0))));
        assert!(!tracker.complete(first, Ok(metrics(10.0))));
        assert_eq!(tracker.latest().unwrap().busy_score, 20.0);
        assert_eq!(tracker.applied(), Some(second));
    }

    #[test]
    fn failure_keeps_previous_snapshot() {
        let tracker = MetricsTracker::new();
        let ok = tracker.begin();
        tracker.complete(ok, Ok(metrics(42.0)));

        let failing = tracker.begin();
        assert!(!tracker.complete(failing, Err(CoreError::Custom("offline".into()))));
        assert_eq!(tracker.latest().unwrap().busy_score, 42.0);
        assert_eq!(tracker.applied(), Some(ok));
    }

    #[test]
    fn nothing_before_first_success() {
        let tracker = MetricsTracker::new();
        assert!(tracker.latest().is_none());
        assert!(tracker.applied().is_none());
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        assert!(matches!(
            RemoteMetricsClient::new("not a url", Duration::from_secs(1)),
            Err(MetricsServiceError::InvalidUrl { .. })
        ));
        assert!(RemoteMetricsClient::from_config(&MetricsConfig::default())
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn local_source_matches_analyzer() {
        let tracker = MetricsTracker::new();
        let snapshot = tracker
            .refresh(&LocalMetrics::default(), &[], &Preferences::default())
            .await
            .unwrap();
        assert_eq!(snapshot, StressMetrics::default());
    }
}

//! Page-view tracking
//!
//! Best-effort analytics collect hits. The tracking id is an explicit
//! configuration value; without one the tracker is a no-op. Tracking must
//! never affect the user flow, so every failure is swallowed.

use std::time::Duration;

use uuid::Uuid;

/// Default analytics collect endpoint
const DEFAULT_COLLECT_URL: &str = "https://www.google-analytics.com/collect";

/// Page-view tracker
pub struct Tracker {
    inner: Option<TrackerInner>,
}

struct TrackerInner {
    client: reqwest::Client,
    collect_url: String,
    tracking_id: String,
    /// Per-process client id
    client_id: String,
}

impl Tracker {
    /// Create a tracker. `None` yields the no-op variant.
    pub fn new(tracking_id: Option<String>) -> Self {
        Self::with_collect_url(tracking_id, DEFAULT_COLLECT_URL)
    }

    /// Create a tracker against a custom collect endpoint
    pub fn with_collect_url(tracking_id: Option<String>, collect_url: impl Into<String>) -> Self {
        let inner = tracking_id.filter(|id| !id.is_empty()).map(|id| TrackerInner {
            client: reqwest::Client::new(),
            collect_url: collect_url.into(),
            tracking_id: id,
            client_id: Uuid::new_v4().to_string(),
        });
        Self { inner }
    }

    /// A tracker that records nothing
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// True when a tracking id is configured
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Record a page view for `path`. Best-effort: failures are logged at
    /// debug level and otherwise ignored.
    pub async fn pageview(&self, path: &str) {
        let Some(inner) = &self.inner else {
            return;
        };

        let result = inner
            .client
            .post(&inner.collect_url)
            .form(&[
                ("v", "1"),
                ("tid", inner.tracking_id.as_str()),
                ("cid", inner.client_id.as_str()),
                ("t", "pageview"),
                ("dp", path),
            ])
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                tracing::debug!("pageview hit returned status {}", response.status());
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!("pageview hit failed: {}", err);
            }
        }
    }
}

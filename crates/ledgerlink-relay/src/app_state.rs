//! Shared relay state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ledgerlink_core::error::{LinkError, Result};

use crate::config::RelayConfig;
use crate::obs::metrics::RelayMetrics;
use crate::subscribers::SubscriberSet;

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: RelayConfig,
    http: reqwest::Client,
    subscribers: SubscriberSet,
    metrics: RelayMetrics,
    listener_up: AtomicBool,
}

impl AppState {
    /// Build application state, including the shared forward HTTP client.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: RelayConfig) -> Result<Self> {
        let forward_timeout = Duration::from_millis(cfg.http.forward_timeout_ms);
        let http = reqwest::Client::builder()
            .timeout(forward_timeout)
            .connect_timeout(forward_timeout.min(MAX_CONNECT_TIMEOUT))
            .build()
            .map_err(|e| LinkError::Internal(format!("build forward http client: {e}")))?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                http,
                subscribers: SubscriberSet::new(),
                metrics: RelayMetrics::default(),
                listener_up: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &RelayConfig {
        &self.inner.cfg
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub fn subscribers(&self) -> &SubscriberSet {
        &self.inner.subscribers
    }

    pub fn metrics(&self) -> &RelayMetrics {
        &self.inner.metrics
    }

    pub fn forward_timeout(&self) -> Duration {
        Duration::from_millis(self.inner.cfg.http.forward_timeout_ms)
    }

    /// Readiness tracks the event listener: a relay that cannot see control
    /// events serves a stale subscriber set.
    pub fn set_listener_up(&self, up: bool) {
        self.inner.listener_up.store(up, Ordering::Relaxed);
    }

    pub fn listener_up(&self) -> bool {
        self.inner.listener_up.load(Ordering::Relaxed)
    }
}

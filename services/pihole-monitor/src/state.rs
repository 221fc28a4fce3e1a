//! Shared state for the endpoint snapshot, observed status and disable timer

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;

use crate::config::PiholeConfig;
use crate::countdown::DisableCountdown;
use crate::status::StatusCache;

/// Shared state accessible by the scheduler, the action dispatcher and the dashboard
#[derive(Debug)]
pub struct SharedState {
    pub endpoint: PiholeConfig,
    pub cache: StatusCache,
    pub countdown: DisableCountdown,
    pub started_at: Instant,
    reconfigured: bool,
}

impl SharedState {
    pub fn new(endpoint: PiholeConfig) -> Self {
        Self {
            endpoint,
            cache: StatusCache::new(),
            countdown: DisableCountdown::Inactive,
            started_at: Instant::now(),
            reconfigured: false,
        }
    }

    /// Swap in a new endpoint configuration. The scheduler polls it on its
    /// next tick.
    pub fn replace_endpoint(&mut self, endpoint: PiholeConfig) {
        tracing::info!(
            "Endpoint reconfigured: host='{}', interval={}s",
            endpoint.hostname,
            endpoint.poll_interval_seconds
        );
        self.endpoint = endpoint;
        self.reconfigured = true;
    }

    /// Returns true once after each `replace_endpoint`
    pub fn take_reconfigured(&mut self) -> bool {
        std::mem::take(&mut self.reconfigured)
    }
}

/// Thread-safe shared state handle
pub type StateHandle = Arc<RwLock<SharedState>>;

pub fn new_state_handle(endpoint: PiholeConfig) -> StateHandle {
    Arc::new(RwLock::new(SharedState::new(endpoint)))
}

pub(crate) fn current_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

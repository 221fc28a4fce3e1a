//! Last observed Pi-hole values and the online flag

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::extract::{Summary, STATUS_ENABLED};

/// Placeholder shown for a value that has never been observed
pub const UNKNOWN: &str = "unknown";

/// Consecutive failures after which a warning is logged
const ERROR_WARN_THRESHOLD: u32 = 5;

/// What the presentation layer displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedStatus {
    pub dns_queries_today: String,
    pub ads_blocked_today: String,
    pub service_enabled: bool,
    pub reachable: bool,
}

impl Default for ObservedStatus {
    fn default() -> Self {
        Self {
            dns_queries_today: UNKNOWN.to_string(),
            ads_blocked_today: UNKNOWN.to_string(),
            service_enabled: false,
            reachable: false,
        }
    }
}

/// Holds the observed status plus poll bookkeeping.
///
/// Values are never blanked: after a failure the previous values stay and
/// only `reachable` drops.
#[derive(Debug, Clone, Default)]
pub struct StatusCache {
    status: ObservedStatus,
    last_poll_epoch_ms: u64,
    consecutive_errors: u32,
    last_error: Option<String>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a successful poll. Fields missing from the summary keep their
    /// previous value.
    pub fn update(&mut self, summary: &Summary, now_ms: u64) {
        if let Ok(value) = &summary.dns_queries_today {
            self.status.dns_queries_today = value.clone();
        }
        if let Ok(value) = &summary.ads_blocked_today {
            self.status.ads_blocked_today = value.clone();
        }
        if let Ok(value) = &summary.status {
            self.status.service_enabled = value == STATUS_ENABLED;
        }
        self.status.reachable = true;
        self.last_poll_epoch_ms = now_ms;
        self.consecutive_errors = 0;

        self.last_error = [
            &summary.dns_queries_today,
            &summary.ads_blocked_today,
            &summary.status,
        ]
        .into_iter()
        .find_map(|field| field.as_ref().err())
        .map(|e| e.to_string());
    }

    /// Record a failed poll
    pub fn mark_unreachable(&mut self, error: &FetchError, now_ms: u64) {
        self.status.reachable = false;
        self.last_poll_epoch_ms = now_ms;
        self.consecutive_errors += 1;
        self.last_error = Some(error.to_string());

        if self.consecutive_errors == ERROR_WARN_THRESHOLD {
            tracing::warn!(
                "Pi-hole has been unreachable for {} consecutive polls",
                self.consecutive_errors
            );
        }
    }

    /// Snapshot of the current values
    pub fn read(&self) -> ObservedStatus {
        self.status.clone()
    }

    pub fn last_poll_epoch_ms(&self) -> u64 {
        self.last_poll_epoch_ms
    }

    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

//! Tick-driven poll scheduler and disable timer

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::SUMMARY_COMMAND;
use crate::error::FetchError;
use crate::extract::Summary;
use crate::fetch::fetch;
use crate::io::HttpClient;
use crate::state::{current_epoch_ms, StateHandle};

/// Where the scheduler is in its poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// No poll performed yet
    Uninitialized,
    /// Waiting for the interval to elapse
    Idle,
    /// A fetch is in flight
    Polling,
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// Result of the poll, if this tick ran one
    pub poll: Option<Result<(), FetchError>>,
    /// The disable countdown reached zero on this tick
    pub countdown_expired: bool,
}

/// Drives polling from an external once-per-second tick.
///
/// `tick` takes `&mut self`, so a single owner processes ticks one at a time
/// and polls can never overlap.
pub struct PollScheduler {
    http: Arc<dyn HttpClient>,
    state: StateHandle,
    phase: PollPhase,
    elapsed_ticks: u64,
}

impl std::fmt::Debug for PollScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollScheduler")
            .field("phase", &self.phase)
            .field("elapsed_ticks", &self.elapsed_ticks)
            .finish()
    }
}

impl PollScheduler {
    pub fn new(http: Arc<dyn HttpClient>, state: StateHandle) -> Self {
        Self {
            http,
            state,
            phase: PollPhase::Uninitialized,
            elapsed_ticks: 0,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Handle one elapsed second
    pub async fn tick(&mut self) -> TickOutcome {
        let (countdown_expired, interval, reconfigured) = {
            let mut state = self.state.write().await;
            let expired = state.countdown.tick();
            (
                expired,
                state.endpoint.poll_interval_seconds.max(1),
                state.take_reconfigured(),
            )
        };

        if countdown_expired {
            tracing::info!("Disable countdown finished");
        }

        if reconfigured {
            tracing::debug!("Endpoint changed, polling immediately");
            self.phase = PollPhase::Uninitialized;
            self.elapsed_ticks = 0;
            return TickOutcome {
                poll: Some(self.poll().await),
                countdown_expired,
            };
        }

        self.elapsed_ticks += 1;
        let poll = if self.elapsed_ticks >= interval {
            Some(self.poll().await)
        } else {
            None
        };

        TickOutcome {
            poll,
            countdown_expired,
        }
    }

    /// Run one poll cycle now and reset the interval counter
    pub async fn poll(&mut self) -> Result<(), FetchError> {
        self.phase = PollPhase::Polling;
        let endpoint = self.state.read().await.endpoint.clone();

        let result = match endpoint.url_for(SUMMARY_COMMAND) {
            Ok(url) => fetch(self.http.as_ref(), &url, endpoint.request_timeout).await,
            Err(e) => Err(e),
        };

        let now_ms = current_epoch_ms();
        let outcome = {
            let mut state = self.state.write().await;
            match result {
                Ok(body) => {
                    let summary = Summary::from_body(&body);
                    let missing = summary.missing();
                    if !missing.is_empty() {
                        tracing::warn!("Pi-hole summary is missing {:?}", missing);
                    }
                    state.cache.update(&summary, now_ms);
                    tracing::debug!("Poll: {:?}", state.cache.read());
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!("Poll of '{}' failed: {}", endpoint.hostname, e);
                    state.cache.mark_unreachable(&e, now_ms);
                    Err(e)
                }
            }
        };

        self.elapsed_ticks = 0;
        self.phase = PollPhase::Idle;
        outcome
    }
}

/// Feed the scheduler one tick per second until cancelled
pub async fn run_ticks(mut scheduler: PollScheduler, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // the first tick of a tokio interval completes immediately
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                scheduler.tick().await;
            }
            _ = cancel.cancelled() => {
                tracing::debug!("Tick loop cancelled");
                break;
            }
        }
    }
}

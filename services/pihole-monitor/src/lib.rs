//! Pi-hole monitor
//!
//! Polls a Pi-hole's summary endpoint on a fixed interval, keeps the last
//! observed values, and sends timed enable/disable commands.

pub mod actions;
pub mod config;
pub mod countdown;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod io;
pub mod scheduler;
pub mod state;
pub mod status;

pub use config::{load_config, Config};
pub use error::{FetchError, MonitorError, Result};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::actions::ActionDispatcher;
use crate::io::ReqwestHttpClient;
use crate::scheduler::PollScheduler;

/// Run the monitor with the given configuration
pub async fn run(config: Config) -> Result<()> {
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new());
    let cancel = CancellationToken::new();

    if !config.pihole.is_configured() {
        tracing::warn!("No Pi-hole hostname configured, the monitor will report offline");
    }

    let state = state::new_state_handle(config.pihole.clone());
    let scheduler = PollScheduler::new(Arc::clone(&http), Arc::clone(&state));
    let actions = Arc::new(ActionDispatcher::new(Arc::clone(&http), Arc::clone(&state)));

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl-c");
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    if config.dashboard.enabled {
        let dashboard_port = config.dashboard.port;
        let router = dashboard::build_router(Arc::clone(&state), actions);
        let cancel_for_dashboard = cancel.clone();

        tokio::spawn(async move {
            let addr = SocketAddr::from(([0, 0, 0, 0], dashboard_port));
            tracing::info!("Dashboard listening on http://{}", addr);

            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!(
                        "Failed to bind dashboard to port {}: {}. Continuing without dashboard.",
                        dashboard_port,
                        e
                    );
                    return;
                }
            };

            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    cancel_for_dashboard.cancelled().await;
                })
                .await
                .ok();

            tracing::debug!("Dashboard stopped");
        });
    }

    tracing::info!(
        "Monitoring '{}' every {}s",
        config.pihole.hostname,
        config.pihole.poll_interval_seconds
    );

    // Blocks until cancelled
    scheduler::run_ticks(scheduler, cancel).await;

    tracing::info!("Pi-hole monitor stopped");
    Ok(())
}

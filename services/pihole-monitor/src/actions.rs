//! User-triggered commands sent to the Pi-hole API

use std::fmt;
use std::sync::Arc;

use crate::countdown::DisableCountdown;
use crate::fetch::fetch;
use crate::io::HttpClient;
use crate::state::StateHandle;

/// A command from the action surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Disable blocking until re-enabled
    Disable,
    /// Disable blocking for a number of seconds
    DisableFor(u32),
    /// Re-enable blocking
    Enable,
    /// Open the settings; handled by the host application
    Configure,
    /// Open the Pi-hole web interface; handled by the host application
    OpenDashboard,
    /// Anything else is forwarded to the API verbatim
    Raw(String),
}

impl Command {
    pub fn parse(command: &str) -> Self {
        let command = command.trim();
        match command {
            "disable" => return Self::Disable,
            "enable" => return Self::Enable,
            "config" => return Self::Configure,
            "open_dashboard" => return Self::OpenDashboard,
            _ => {}
        }

        match command
            .strip_prefix("disable=")
            .and_then(|s| s.parse::<u32>().ok())
        {
            Some(seconds) if seconds > 0 => Self::DisableFor(seconds),
            _ => Self::Raw(command.to_string()),
        }
    }

    /// Commands the host application handles without talking to the Pi-hole
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Configure | Self::OpenDashboard)
    }
}

impl fmt::Display for Command {
    /// The text substituted into the URL pattern's command slot
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disable => write!(f, "disable"),
            Self::DisableFor(seconds) => write!(f, "disable={}", seconds),
            Self::Enable => write!(f, "enable"),
            Self::Configure => write!(f, "config"),
            Self::OpenDashboard => write!(f, "open_dashboard"),
            Self::Raw(command) => write!(f, "{}", command),
        }
    }
}

/// Sends commands and keeps the local disable countdown in step.
///
/// The status cache is left alone; the next scheduled poll picks up the
/// Pi-hole's new state.
pub struct ActionDispatcher {
    http: Arc<dyn HttpClient>,
    state: StateHandle,
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher").finish_non_exhaustive()
    }
}

impl ActionDispatcher {
    pub fn new(http: Arc<dyn HttpClient>, state: StateHandle) -> Self {
        Self { http, state }
    }

    /// Send `command`, returning whether the request succeeded
    pub async fn send_command(&self, command: &str) -> bool {
        self.send(&Command::parse(command)).await
    }

    pub async fn send(&self, command: &Command) -> bool {
        if command.is_local() {
            tracing::warn!("'{}' is handled by the host application, not sent", command);
            return false;
        }

        let endpoint = self.state.read().await.endpoint.clone();
        let query = command.to_string();
        let result = match endpoint.url_for(&query) {
            Ok(url) => fetch(self.http.as_ref(), &url, endpoint.request_timeout).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            tracing::warn!("Command '{}' failed: {}", query, e);
            return false;
        }

        let mut state = self.state.write().await;
        match command {
            Command::Disable => state.countdown = DisableCountdown::Indefinite,
            Command::DisableFor(seconds) => {
                state.countdown = DisableCountdown::for_seconds(*seconds)
            }
            Command::Enable => state.countdown = DisableCountdown::Inactive,
            Command::Configure | Command::OpenDashboard | Command::Raw(_) => {}
        }
        tracing::info!("Command '{}' sent, countdown {}", query, state.countdown);
        true
    }
}

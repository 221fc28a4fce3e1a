//! Configuration types for the pihole monitor

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Command used for the periodic summary poll
pub const SUMMARY_COMMAND: &str = "summaryRaw";

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "PIHOLE_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pihole: PiholeConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// The monitored Pi-hole endpoint.
///
/// The engine only ever works on a cloned snapshot of this value; a
/// configuration change replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiholeConfig {
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub api_key: String,
    /// Three `%s` slots, filled with hostname, command and API key
    #[serde(default = "default_url_pattern")]
    pub url_pattern: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for PiholeConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            api_key: String::new(),
            url_pattern: default_url_pattern(),
            poll_interval_seconds: default_poll_interval(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl PiholeConfig {
    /// Whether there is anything to poll at all
    pub fn is_configured(&self) -> bool {
        !self.hostname.trim().is_empty() && !self.url_pattern.trim().is_empty()
    }

    /// Build the request URL for `command`.
    ///
    /// Slots beyond the third are left empty.
    pub fn url_for(&self, command: &str) -> std::result::Result<String, FetchError> {
        if !self.is_configured() {
            return Err(FetchError::NoEndpointConfigured);
        }

        let values = [self.hostname.as_str(), command, self.api_key.as_str()];
        let mut url = String::with_capacity(self.url_pattern.len() + 64);
        for (i, part) in self.url_pattern.split("%s").enumerate() {
            if i > 0 {
                url.push_str(values.get(i - 1).copied().unwrap_or_default());
            }
            url.push_str(part);
        }
        Ok(url)
    }

    /// URL of the Pi-hole web interface, opened by the `open_dashboard` action
    pub fn admin_url(&self) -> Option<String> {
        let host = self.hostname.trim();
        if host.is_empty() {
            None
        } else {
            Some(format!("http://{}/", host))
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_dashboard_port")]
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_dashboard_port(),
        }
    }
}

impl Config {
    /// Fill an empty API key from the environment
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        if self.pihole.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                tracing::debug!("Using API key from {}", API_KEY_ENV);
                self.pihole.api_key = key;
            }
        }
        Ok(())
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.pihole.poll_interval_seconds == 0 {
            return Err(crate::MonitorError::Config(
                "poll_interval_seconds must be at least 1".to_string(),
            ));
        }

        let slots = self.pihole.url_pattern.matches("%s").count();
        if slots != 3 {
            return Err(crate::MonitorError::Config(format!(
                "url_pattern must contain exactly three %s slots (host, command, api key), found {}",
                slots
            )));
        }

        Ok(())
    }
}

fn default_url_pattern() -> String {
    "http://%s/admin/api.php?%s&auth=%s".to_string()
}

fn default_poll_interval() -> u64 {
    10
}

fn default_request_timeout() -> Duration {
    Duration::from_millis(500)
}

fn default_true() -> bool {
    true
}

fn default_dashboard_port() -> u16 {
    11120
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::MonitorError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

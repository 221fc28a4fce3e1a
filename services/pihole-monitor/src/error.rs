//! Error types for the pihole monitor

/// Errors that can occur in the pihole monitor service
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single poll cycle or action request did not produce a usable response.
///
/// Every variant is recoverable: the scheduler marks the cache unreachable
/// (or leaves one field stale for `FieldMissing`) and retries on the next
/// interval.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("No Pi-hole endpoint configured")]
    NoEndpointConfigured,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Empty response body")]
    EmptyResponse,

    #[error("Authentication rejected (incorrect API key)")]
    AuthRejected,

    #[error("Field '{0}' missing from response")]
    FieldMissing(String),
}

/// Result type alias for pihole monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;

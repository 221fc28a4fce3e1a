//! Single bounded GET against the Pi-hole API

use std::time::Duration;

use crate::error::{FetchError, MonitorError};
use crate::io::HttpClient;

/// Body Pi-hole answers with when the API key is wrong
const AUTH_REJECTED_BODY: &str = "[]";

/// Perform one GET and classify the outcome.
///
/// Never retries; the scheduler simply tries again on the next interval.
pub async fn fetch(
    http: &dyn HttpClient,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let response = http
        .get(url, timeout)
        .await
        .map_err(|e| match e {
            MonitorError::Http(msg) => FetchError::Transport(msg),
            other => FetchError::Transport(other.to_string()),
        })?;

    if response.status >= 400 {
        return Err(FetchError::HttpStatus(response.status));
    }
    if response.body.is_empty() {
        return Err(FetchError::EmptyResponse);
    }
    if response.body == AUTH_REJECTED_BODY {
        return Err(FetchError::AuthRejected);
    }

    Ok(response.body)
}

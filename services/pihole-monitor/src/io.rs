//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request, following redirects, giving up after `timeout`
    async fn get(&self, url: &str, timeout: Duration) -> crate::Result<HttpResponse>;
}

/// Query parameter carrying the Pi-hole API key
const AUTH_PARAM: &str = "auth=";

/// Mask the value of the `auth` query parameter so the URL can be logged
pub fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| match pair.strip_prefix(AUTH_PARAM) {
            Some(value) if !value.is_empty() => format!("{}***", AUTH_PARAM),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, timeout: Duration) -> crate::Result<HttpResponse> {
        // reqwest errors carry the full URL, api key included
        let redacted = redact_url(url);
        tracing::debug!("GET {} (timeout {:?})", redacted, timeout);
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                crate::MonitorError::Http(format!("GET {} failed: {}", redacted, e.without_url()))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            crate::MonitorError::Http(format!("Reading response body: {}", e.without_url()))
        })?;

        tracing::debug!("GET {} -> {} ({} bytes)", redacted, status, body.len());
        Ok(HttpResponse { status, body })
    }
}

//! Field scanner for the flat summary payload
//!
//! Pi-hole's `summaryRaw` answer is a single-level object of scalar values.
//! Rather than decoding it, each field is located by its quoted name and the
//! raw text up to the next delimiter is returned. String values keep their
//! quotes, so callers compare against quoted literals such as `"enabled"`.

use crate::error::FetchError;

/// Queries counted since midnight
pub const DNS_QUERIES_TODAY: &str = "dns_queries_today";

/// Queries blocked since midnight
pub const ADS_BLOCKED_TODAY: &str = "ads_blocked_today";

/// Blocking status, `"enabled"` or `"disabled"`
pub const STATUS: &str = "status";

/// Quoted literal reported while blocking is active
pub const STATUS_ENABLED: &str = "\"enabled\"";

/// Return the raw text of `field` in `body`.
///
/// Assumes field names are not substrings of other names or values.
pub fn extract_field(body: &str, field: &str) -> Result<String, FetchError> {
    let marker = format!("\"{}\"", field);
    let missing = || FetchError::FieldMissing(field.to_string());

    let start = body.find(&marker).ok_or_else(missing)? + marker.len();
    let rest = body[start..].trim_start();
    let rest = rest.strip_prefix(':').ok_or_else(missing)?;

    let end = rest.find([',', '}']).unwrap_or(rest.len());
    Ok(rest[..end].trim().to_string())
}

/// The fields one poll cycle looks for, each resolved independently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub dns_queries_today: Result<String, FetchError>,
    pub ads_blocked_today: Result<String, FetchError>,
    pub status: Result<String, FetchError>,
}

impl Summary {
    pub fn from_body(body: &str) -> Self {
        Self {
            dns_queries_today: extract_field(body, DNS_QUERIES_TODAY),
            ads_blocked_today: extract_field(body, ADS_BLOCKED_TODAY),
            status: extract_field(body, STATUS),
        }
    }

    /// Names of fields that were not found
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (DNS_QUERIES_TODAY, self.dns_queries_today.is_err()),
            (ADS_BLOCKED_TODAY, self.ads_blocked_today.is_err()),
            (STATUS, self.status.is_err()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}

//! Shared API request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response returned by `GET /health` on every service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process is serving
    pub status: String,

    /// Static service identity
    pub service: String,

    /// Crate version of the running binary
    pub version: String,

    /// Time the response was produced
    pub timestamp: DateTime<Utc>,

    /// Time since service start, e.g. `1h2m3.5s`
    pub uptime: String,
}

impl HealthResponse {
    /// Build a healthy response for `service`
    pub fn healthy(service: &str, version: &str, uptime: String) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            timestamp: crate::time::now(),
            uptime,
        }
    }
}

/// Error body for all 4xx/5xx JSON responses
///
/// # Examples
///
/// ```
/// use geoproc_common::api::types::ErrorResponse;
///
/// let body = serde_json::to_value(ErrorResponse::new("user_id required")).unwrap();
/// assert_eq!(body["error"], "user_id required");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serializes_all_fields() {
        let health = HealthResponse::healthy("location-processor", "0.1.0", "5s".to_string());
        let json = serde_json::to_value(&health).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "location-processor");
        assert_eq!(json["version"], "0.1.0");
        assert_eq!(json["uptime"], "5s");
        assert!(json["timestamp"].is_string());
    }
}

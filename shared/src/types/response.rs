//! API response types and wrappers

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Standard API response envelope
///
/// Every success payload is wrapped in this shape. The wrapper is generic
/// over the payload so each endpoint's envelope is fixed at compile time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Response data (null on failure)
    pub data: Option<T>,

    /// Human-readable message
    pub message: String,

    /// Response timestamp in milliseconds since the epoch
    pub timestamp: i64,

    /// HTTP status code mirrored into the body
    pub status_code: u16,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with the default message
    pub fn success(data: T) -> Self {
        Self::success_with_message(data, "success")
    }

    /// Create a successful response with a custom message
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            timestamp: Utc::now().timestamp_millis(),
            status_code: 200,
        }
    }

    /// Override the mirrored status code
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl ApiResponse<()> {
    /// Create a failure envelope without payload
    pub fn failure(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            timestamp: Utc::now().timestamp_millis(),
            status_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success(serde_json::json!({ "id": 1 }));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["statusCode"], 200);
        assert!(json["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_failure_envelope_has_null_data() {
        let response = ApiResponse::failure("boom", 500);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["statusCode"], 500);
    }
}

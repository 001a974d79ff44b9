//! Success response envelope.
//!
//! Mirrors the failure envelope in `error.rs`: clients always receive
//! `{ success, message, data, timestamp }` with `success: true`.

use chrono::Utc;
use serde::Serialize;

/// Success envelope wrapping a response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload with a human-readable message.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            data,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = ApiResponse::new("Record fetched successfully", 42);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Record fetched successfully");
        assert_eq!(json["data"], 42);
        assert!(json["timestamp"].is_string());
    }
}

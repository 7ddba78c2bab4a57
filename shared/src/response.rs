//! API Response types
//!
//! The onboarding backend wraps every successful body in a `data` field:
//!
//! ```json
//! { "data": [ { "id": 1, "name": "Engineering" } ] }
//! ```

use serde::{Deserialize, Serialize};

/// Response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Response data (absent on some endpoints, e.g. delete confirmations)
    pub data: Option<T>,
    /// Human-readable message, when the backend sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Wrap data in an envelope
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
        }
    }

    /// Take the data, falling back to the type's default when absent
    pub fn into_data_or_default(self) -> T
    where
        T: Default,
    {
        self.data.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_data_defaults() {
        let env: ApiEnvelope<Vec<String>> = serde_json::from_value(json!({})).unwrap();
        assert!(env.data.is_none());
        assert!(env.into_data_or_default().is_empty());
    }

    #[test]
    fn test_message_only_envelope() {
        let env: ApiEnvelope<serde_json::Value> =
            serde_json::from_value(json!({"message": "Employee deleted"})).unwrap();
        assert_eq!(env.message.as_deref(), Some("Employee deleted"));
    }

    #[test]
    fn test_ok_round_trip() {
        let value = serde_json::to_value(ApiEnvelope::ok(vec![1, 2])).unwrap();
        assert_eq!(value, json!({"data": [1, 2]}));
    }
}

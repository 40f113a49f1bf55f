//! Uniform response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{error, message, data}` wrapper used for every broker response, and
/// expected back from every downstream service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub error: bool,

    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    /// Successful outcome carrying optional data.
    pub fn success(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data,
        }
    }

    /// Failed outcome. Never carries data.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Serialize an envelope to JSON bytes.
pub fn encode_response(envelope: &ResponseEnvelope) -> Vec<u8> {
    // A struct of bool, String and Value always serializes.
    serde_json::to_vec(envelope).unwrap_or_else(|_| {
        br#"{"error":true,"message":"failed to encode response"}"#.to_vec()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_preserves_nested_data() {
        let envelope = ResponseEnvelope::success(
            "Authenticated!",
            Some(json!({
                "id": 7,
                "email": "a@b.com",
                "roles": ["admin", {"scope": "all"}],
                "profile": {"active": true, "score": 1.5, "note": null}
            })),
        );

        let bytes = encode_response(&envelope);
        let decoded: ResponseEnvelope = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_failure_omits_data() {
        let bytes = encode_response(&ResponseEnvelope::failure("no such action available"));
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value, json!({"error": true, "message": "no such action available"}));
    }

    #[test]
    fn test_decode_is_permissive() {
        let decoded: ResponseEnvelope =
            serde_json::from_str(r#"{"error":false,"data":{"x":1},"extra":"ignored"}"#).unwrap();

        assert!(!decoded.error);
        assert_eq!(decoded.message, "");
        assert_eq!(decoded.data, Some(json!({"x": 1})));
    }
}

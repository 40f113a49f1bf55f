//! Inbound request envelope.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Default maximum inbound body size (1 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Tagged request sent by callers to the dispatch endpoint.
///
/// Only the sub-payload selected by `action` is looked at; the others are
/// ignored even when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestEnvelope {
    #[serde(deserialize_with = "null_as_empty")]
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger: Option<LoggerPayload>,
}

/// Credentials forwarded to the authentication service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthPayload {
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

/// Log entry forwarded to the logging service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerPayload {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub data: String,
}

/// JSON `null` decodes to the empty string, same as an absent field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why an inbound body could not be turned into a [`RequestEnvelope`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("body must not be empty")]
    Empty,

    #[error("body must not be larger than {limit} bytes")]
    TooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    Read(String),

    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("body must have only a single JSON value")]
    TrailingData,
}

/// Decode an inbound body, enforcing `limit` bytes.
pub fn decode_request(bytes: &[u8], limit: usize) -> Result<RequestEnvelope, DecodeError> {
    if bytes.len() > limit {
        return Err(DecodeError::TooLarge { limit });
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let envelope = RequestEnvelope::deserialize(&mut de)?;
    de.end().map_err(|_| DecodeError::TrailingData)?;

    Ok(envelope)
}

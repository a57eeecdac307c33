// Graph response decoding

use relay_core::port::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// `{"error": {...}}` body returned on failures
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: GraphError,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    code: i64,
}

/// Response carrying a created object id
#[derive(Debug, Deserialize)]
pub(crate) struct IdResponse {
    pub id: String,
}

/// Response of calls that only acknowledge
#[derive(Debug, Deserialize)]
pub(crate) struct SuccessResponse {
    pub success: bool,
}

/// `upload_phase=start` answer
#[derive(Debug, Deserialize)]
pub(crate) struct UploadSession {
    #[serde(deserialize_with = "string_or_number")]
    pub video_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub upload_session_id: String,
    #[serde(flatten)]
    pub window: ChunkWindow,
}

/// Byte range the server expects next; equal offsets mean the transfer is done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(crate) struct ChunkWindow {
    #[serde(deserialize_with = "offset")]
    pub start_offset: u64,
    #[serde(deserialize_with = "offset")]
    pub end_offset: u64,
}

impl ChunkWindow {
    pub fn is_complete(&self) -> bool {
        self.start_offset >= self.end_offset
    }

    pub fn len(&self) -> u64 {
        self.end_offset.saturating_sub(self.start_offset)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

fn offset<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Number(n) => Ok(n),
        StringOrNumber::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Turn a status + body into the expected payload or an `ApiError`
pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return Err(ApiError::Remote {
            code: envelope.error.code,
            kind: envelope.error.kind,
            message: envelope.error.message,
        });
    }

    if !(200..300).contains(&status) {
        return Err(ApiError::InvalidResponse(format!(
            "HTTP {} without error body: {}",
            status,
            truncate(body)
        )));
    }

    serde_json::from_str(body).map_err(|e| {
        ApiError::InvalidResponse(format!("{} in body: {}", e, truncate(body)))
    })
}

/// Like [`decode`], for calls answering `{"success": bool}`
pub(crate) fn expect_success(status: u16, body: &str) -> Result<(), ApiError> {
    let response: SuccessResponse = decode(status, body)?;
    if response.success {
        Ok(())
    } else {
        Err(ApiError::InvalidResponse(
            "Target reported success=false".to_string(),
        ))
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

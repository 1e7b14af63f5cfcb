//! Messages API wire types and the transport seam.
//!
//! `RewriteClient` only depends on `MessagesTransport`; the curl-backed
//! implementation lives in `transport`.

mod transport;

pub use transport::CurlTransport;

use crate::control::CancelToken;
use crate::error::RewriteError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Body of `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<Message>,
}

/// One block of generated content. Only `text` is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

/// Successful response. Unknown fields (id, usage, stop_reason) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
}

const MAX_RAW_ERROR_LEN: usize = 200;

/// Human-readable message for a non-2xx body: the API error object if present,
/// otherwise the (truncated) raw body.
pub(crate) fn error_message(body: &[u8]) -> String {
    if let Ok(env) = serde_json::from_slice::<ErrorEnvelope>(body) {
        return match (env.error.kind.is_empty(), env.error.message.is_empty()) {
            (false, false) => format!("{}: {}", env.error.kind, env.error.message),
            (true, false) => env.error.message,
            _ => env.error.kind,
        };
    }
    let raw = String::from_utf8_lossy(body);
    let raw = raw.trim();
    if raw.is_empty() {
        return "empty body".to_string();
    }
    raw.chars().take(MAX_RAW_ERROR_LEN).collect()
}

/// Sends one messages request to the text-generation service.
///
/// Implementations perform exactly one round trip and never retry. They must
/// return `RewriteError::Cancelled` if `cancel` is set while the call is in flight.
pub trait MessagesTransport {
    fn send(
        &self,
        request: &MessagesRequest,
        cancel: &CancelToken,
    ) -> Result<MessagesResponse, RewriteError>;
}

//! Defines the data structures used for API request and response bodies.

use serde::Serialize;
use serde_json::{Map, Value};

/// Acknowledgement returned by every successful mutation: `{"status":"ok"}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        StatusResponse { status: "ok" }
    }
}

/// Interprets a raw POST body as JSON. Unparsable bodies (including empty
/// ones) become an empty object rather than a client error.
pub fn body_to_document(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Map::new()))
}

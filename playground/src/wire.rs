//! JSON bodies exchanged with the execution service.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExecuteRequest {
    pub code: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ExecuteResponse {
    pub success: bool,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecuteResponse {
    pub fn decode(body: &Bytes) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }
}

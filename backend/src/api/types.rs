//! REST API types.
//!
//! The conversion endpoint answers with CSV, not JSON. These types cover the
//! JSON documents around it: health and errors.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Response of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub endpoints: Value,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: "becu-convert".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: json!({
                "convert": "POST /api/convert",
                "logs": "GET /api/logs (SSE)"
            }),
        }
    }
}

/// Body returned when a request is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub job_id: String,
    pub status: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(job_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: "error".to_string(),
            error: error.into(),
        }
    }
}

/// File name offered for download: `<stem>-grouped.csv`.
///
/// The stem is reduced to printable ASCII so it fits in a header value.
pub fn download_name(upload_name: Option<&str>) -> String {
    let stem = upload_name
        .map(std::path::Path::new)
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .map(|s| {
            s.chars()
                .filter(|c| *c != '"' && *c != '\\')
                .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '_' })
                .collect::<String>()
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "converted".to_string());
    format!("{}-grouped.csv", stem)
}

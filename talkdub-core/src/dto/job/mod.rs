//! Job DTOs for the jobs API

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::job::JobStatus;

/// Request to submit a new dubbing job (`POST /api/v1/jobs`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateJob {
    pub video_url: String,
    pub src_lang: String,
    pub tgt_lang: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// Response to a job submission
///
/// `status` is `ALREADY_QUEUED` when the service matched the video against a
/// submission from the last 24 hours; `job_id` then names the existing job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreated {
    pub job_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub estimated_completion: Option<String>,
    #[serde(default)]
    pub status_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl JobCreated {
    pub fn is_duplicate(&self) -> bool {
        self.status == JobStatus::AlreadyQueued
    }
}

/// Error body of a non-success response
///
/// `detail` is a plain string for application errors and an array of
/// `{loc, msg, type}` objects for request validation errors.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: JsonValue,
}

impl ErrorBody {
    /// Flatten `detail` into a single human-readable line
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        JsonValue::String(s) => Some(s.clone()),
                        other => other.get("msg").and_then(|m| m.as_str()).map(String::from),
                    })
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("; "))
                }
            }
            JsonValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

//! Job domain types

use serde::{Deserialize, Serialize};

/// Lifecycle state of a dubbing job as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Queued,
    Pending,
    Processing,
    Completed,
    Failed,
    Paused,
    Expired,
    /// Returned on submission when the same video is already being handled
    AlreadyQueued,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// COMPLETED and FAILED are the only states a job never leaves
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Wire spelling of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "QUEUED",
            JobStatus::Pending => "PENDING",
            JobStatus::Processing => "PROCESSING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
            JobStatus::Paused => "PAUSED",
            JobStatus::Expired => "EXPIRED",
            JobStatus::AlreadyQueued => "ALREADY_QUEUED",
            JobStatus::Unknown => "UNKNOWN",
        }
    }

    /// Style class of the status badge
    pub fn css_class(&self) -> String {
        format!("status-{}", self.as_str().to_lowercase())
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Segment progress of a job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub completed_segments: u32,
    #[serde(default)]
    pub total_segments: u32,
}

/// Snapshot returned by `GET /api/v1/jobs/{job_id}/status`
///
/// Timestamps are kept as the text the service sent. The service does not
/// always emit strict RFC 3339, so parsing is left to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatusReport {
    pub job_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub current_phase: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub estimated_completion: Option<String>,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default)]
    pub download_available: bool,
    #[serde(default)]
    pub download_expires_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(!JobStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let status: JobStatus = serde_json::from_str("\"RESCHEDULED\"").unwrap();
        assert_eq!(status, JobStatus::Unknown);
    }

    #[test]
    fn test_css_class_is_lowercase() {
        assert_eq!(JobStatus::Processing.css_class(), "status-processing");
        assert_eq!(JobStatus::AlreadyQueued.css_class(), "status-already_queued");
    }

    #[test]
    fn test_report_from_service_payload() {
        let json = r#"{
            "job_id": "0f8c2b1e-4d7a-4a59-9c3e-2d1b6f0a9e11",
            "status": "PROCESSING",
            "current_phase": "tts_qwen",
            "progress": {"completed_segments": 3, "total_segments": 7, "percent": 42.567},
            "created_at": "2025-03-01T10:00:00.123456Z",
            "estimated_completion": "2025-03-02T10:00:00.123456+00:00Z",
            "download_available": false,
            "download_expires_at": null,
            "error": null
        }"#;

        let report: JobStatusReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.status, JobStatus::Processing);
        assert_eq!(report.current_phase.as_deref(), Some("tts_qwen"));
        assert_eq!(report.progress.completed_segments, 3);
        assert_eq!(report.progress.total_segments, 7);
        assert!(!report.download_available);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_report_defaults_missing_fields() {
        let json = r#"{"job_id": "abc", "status": "QUEUED", "created_at": "2025-03-01T10:00:00Z"}"#;

        let report: JobStatusReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.progress, Progress::default());
        assert!(!report.download_available);
        assert!(report.estimated_completion.is_none());
    }
}

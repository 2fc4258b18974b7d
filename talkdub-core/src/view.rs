//! Status view model
//!
//! Maps a [`JobStatusReport`] to everything a status display shows.
//! Rendering is pure so it can be checked without any output surface.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::job::{JobStatusReport, Progress};

/// Phase label shown before the pipeline reports a phase
pub const PHASE_PLACEHOLDER: &str = "待機中...";

/// Shown for a timestamp the service did not send
pub const MISSING_TIMESTAMP: &str = "-";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Status badge: text plus style class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub class: String,
}

/// Progress bar geometry and caption
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    /// Fill width, 0.0 to 100.0
    pub width_percent: f64,
    pub label: String,
}

/// Everything the status display shows for one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub job_id: String,
    pub phase_label: String,
    pub created_at: String,
    pub eta: String,
    pub badge: Badge,
    pub progress: ProgressBar,
    pub download_visible: bool,
    pub error_banner: Option<String>,
}

/// Render a status snapshot
pub fn render_status(report: &JobStatusReport) -> StatusView {
    StatusView {
        job_id: report.job_id.clone(),
        phase_label: report
            .current_phase
            .clone()
            .unwrap_or_else(|| PHASE_PLACEHOLDER.to_string()),
        created_at: format_timestamp(&report.created_at),
        eta: report
            .estimated_completion
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_else(|| MISSING_TIMESTAMP.to_string()),
        badge: Badge {
            text: report.status.as_str().to_string(),
            class: report.status.css_class(),
        },
        progress: progress_bar(&report.progress),
        download_visible: report.download_available,
        error_banner: report.error.clone(),
    }
}

/// Progress caption, e.g. `3 / 7 セグメント完了 (42.6%)`
pub fn progress_label(progress: &Progress) -> String {
    format!(
        "{} / {} セグメント完了 ({:.1}%)",
        progress.completed_segments, progress.total_segments, progress.percent
    )
}

fn progress_bar(progress: &Progress) -> ProgressBar {
    let width_percent = if progress.percent.is_finite() {
        progress.percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    ProgressBar {
        width_percent,
        label: progress_label(progress),
    }
}

/// File name a downloaded artifact is saved under
pub fn download_filename(job_id: &str) -> String {
    format!("dub_{}.zip", job_id)
}

/// Parse a service timestamp leniently
///
/// Accepts RFC 3339, RFC 3339 with a redundant trailing `Z`
/// (`...+00:00Z`) and naive ISO-8601, which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let stripped = raw.strip_suffix('Z').unwrap_or(raw);
    if let Ok(dt) = DateTime::parse_from_rfc3339(stripped) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(stripped, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a service timestamp for display, falling back to the raw text
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

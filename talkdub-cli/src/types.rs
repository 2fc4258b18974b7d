//! Common types used across CLI modules

use talkdub_core::validation::job_id_from_path;

/// A job addressed on the command line
///
/// Accepts a bare id, a status page path (`/status/{job_id}`) or the full
/// status page URL from the notification mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRef(String);

impl JobRef {
    /// Parse a command-line argument into a job reference
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        job_id_from_path(input.trim())
            .map(JobRef)
            .ok_or_else(|| anyhow::anyhow!("No job ID found in '{}'", input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

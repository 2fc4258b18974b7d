//! Job-related API endpoints

use talkdub_core::domain::job::JobStatusReport;
use talkdub_core::dto::job::{CreateJob, JobCreated};
use talkdub_core::validation::ValidationError;

use crate::DubbingClient;
use crate::error::Result;

impl DubbingClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Submit a new dubbing job
    ///
    /// # Arguments
    /// * `req` - The job submission
    ///
    /// # Returns
    /// The accepted job. When the service already has a job for the same
    /// video, its id is returned with status `ALREADY_QUEUED`.
    ///
    /// # Example
    /// ```no_run
    /// # use talkdub_client::DubbingClient;
    /// # use talkdub_core::dto::job::CreateJob;
    /// # async fn example() -> talkdub_client::Result<()> {
    /// let client = DubbingClient::new("http://localhost:8000");
    /// let job = client.create_job(CreateJob {
    ///     video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
    ///     src_lang: "ja".to_string(),
    ///     tgt_lang: "en".to_string(),
    ///     email: "user@example.com".to_string(),
    ///     webhook_url: None,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_job(&self, req: CreateJob) -> Result<JobCreated> {
        let url = self.url("/jobs");
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Get the current status snapshot of a job
    ///
    /// A job whose own status is FAILED is still a successful fetch; only
    /// a non-success HTTP status is an error.
    ///
    /// # Arguments
    /// * `job_id` - The opaque job identifier
    pub async fn get_job_status(&self, job_id: &str) -> Result<JobStatusReport> {
        let job_id = checked_job_id(job_id)?;
        let url = self.url(&format!("/jobs/{}/status", job_id));
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}

/// Reject ids that cannot address a job route
pub(crate) fn checked_job_id(job_id: &str) -> std::result::Result<&str, ValidationError> {
    let job_id = job_id.trim();
    if job_id.is_empty() || job_id.contains(['/', '?', '#']) {
        return Err(ValidationError::MissingJobId);
    }
    Ok(job_id)
}

//! Artifact download endpoint

use talkdub_core::validation::PinCode;

use crate::DubbingClient;
use crate::error::Result;
use crate::jobs::checked_job_id;

/// Header carrying the download PIN
pub const PIN_HEADER: &str = "X-PIN";

const DOWNLOAD_COUNT_HEADER: &str = "X-Download-Count";
const EXPIRES_AT_HEADER: &str = "X-Expires-At";

/// A downloaded delivery archive
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Raw archive bytes
    pub bytes: Vec<u8>,
    /// Downloads consumed so far, as reported by the service
    pub download_count: Option<u32>,
    /// When the service deletes the delivery
    pub expires_at: Option<String>,
}

impl DubbingClient {
    /// Download the delivery archive of a completed job
    ///
    /// The PIN is sent with every call; nothing is cached between attempts.
    ///
    /// # Arguments
    /// * `job_id` - The job identifier
    /// * `pin` - The six-digit PIN issued for the job
    pub async fn download_artifact(&self, job_id: &str, pin: &PinCode) -> Result<Artifact> {
        let job_id = checked_job_id(job_id)?;
        let url = self.url(&format!("/jobs/{}/download", job_id));
        let response = self
            .client
            .get(&url)
            .header(PIN_HEADER, pin.as_str())
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let download_count = header(DOWNLOAD_COUNT_HEADER).and_then(|v| v.parse().ok());
        let expires_at = header(EXPIRES_AT_HEADER);

        let bytes = response.bytes().await?.to_vec();
        tracing::debug!("Downloaded {} bytes for job {}", bytes.len(), job_id);

        Ok(Artifact {
            bytes,
            download_count,
            expires_at,
        })
    }
}

//! Data sources for the poller and the download gate
//!
//! The poller and the gate only need one call each. These traits let them
//! run against [`DubbingClient`] in production and against fakes in tests.

use async_trait::async_trait;
use talkdub_core::domain::job::JobStatusReport;
use talkdub_core::validation::PinCode;

use crate::DubbingClient;
use crate::download::Artifact;
use crate::error::Result;

/// Something that can report the status of a job
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, job_id: &str) -> Result<JobStatusReport>;
}

/// Something that can exchange a PIN for a job's artifact
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    async fn fetch_artifact(&self, job_id: &str, pin: &PinCode) -> Result<Artifact>;
}

#[async_trait]
impl StatusSource for DubbingClient {
    async fn fetch_status(&self, job_id: &str) -> Result<JobStatusReport> {
        self.get_job_status(job_id).await
    }
}

#[async_trait]
impl ArtifactSource for DubbingClient {
    async fn fetch_artifact(&self, job_id: &str, pin: &PinCode) -> Result<Artifact> {
        self.download_artifact(job_id, pin).await
    }
}

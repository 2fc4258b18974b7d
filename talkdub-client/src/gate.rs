//! PIN-gated download
//!
//! Exchanges a six-digit PIN for the delivery archive of a job and saves it
//! as `dub_<job_id>.zip`. The gate stays open after any failure so the user
//! can try again; each attempt resends the full PIN.

use std::path::{Path, PathBuf};

use talkdub_core::validation::{PIN_LENGTH, PinCode};
use talkdub_core::view::download_filename;
use tracing::{info, warn};

use crate::source::ArtifactSource;

/// A delivery archive written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub path: PathBuf,
    pub size: usize,
    pub download_count: Option<u32>,
    pub expires_at: Option<String>,
}

/// Download prompt state for one job
#[derive(Debug, Clone)]
pub struct DownloadGate {
    job_id: String,
    output_dir: PathBuf,
    open: bool,
    error: Option<String>,
}

impl DownloadGate {
    /// Creates a closed gate that saves into `output_dir`
    pub fn new(job_id: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            job_id: job_id.into(),
            output_dir: output_dir.into(),
            open: false,
            error: None,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Shows the prompt with a clean error region
    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Message of the last failed attempt
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Where the archive will be written
    pub fn destination(&self) -> PathBuf {
        self.output_dir.join(download_filename(&self.job_id))
    }

    /// Submits a PIN typed as one string
    ///
    /// Returns the saved archive on success; the gate is closed. On failure
    /// the gate stays open with [`DownloadGate::error`] set.
    pub async fn submit(
        &mut self,
        source: &dyn ArtifactSource,
        pin_input: &str,
    ) -> Option<SavedArtifact> {
        self.open = true;
        match PinCode::parse(pin_input) {
            Ok(pin) => self.exchange(source, &pin).await,
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Submits a PIN entered digit by digit
    pub async fn submit_cells(
        &mut self,
        source: &dyn ArtifactSource,
        cells: [&str; PIN_LENGTH],
    ) -> Option<SavedArtifact> {
        self.open = true;
        match PinCode::from_cells(cells) {
            Ok(pin) => self.exchange(source, &pin).await,
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    async fn exchange(&mut self, source: &dyn ArtifactSource, pin: &PinCode) -> Option<SavedArtifact> {
        let artifact = match source.fetch_artifact(&self.job_id, pin).await {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!("Download of job {} refused: {}", self.job_id, e);
                self.error = Some(e.to_string());
                return None;
            }
        };

        let path = self.destination();
        if let Err(e) = write_archive(&self.output_dir, &path, &artifact.bytes).await {
            warn!("Failed to save {}: {}", path.display(), e);
            self.error = Some(format!("ファイルの保存に失敗しました: {}", e));
            return None;
        }

        info!(
            "Saved {} bytes for job {} to {}",
            artifact.bytes.len(),
            self.job_id,
            path.display()
        );
        self.close();

        Some(SavedArtifact {
            path,
            size: artifact.bytes.len(),
            download_count: artifact.download_count,
            expires_at: artifact.expires_at,
        })
    }
}

async fn write_archive(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(path, bytes).await
}

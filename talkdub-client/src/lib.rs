//! TalkDub HTTP Client
//!
//! A small, type-safe client for the TalkDub jobs API, plus the two
//! stateful pieces built on it: the job status poller and the PIN-gated
//! download.
//!
//! # Example
//!
//! ```no_run
//! use talkdub_client::{DubbingClient, StatusPoller, PollEvent};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Arc::new(DubbingClient::new("http://localhost:8000"));
//!     let (handle, mut events) = StatusPoller::new(client, "0f8c2b1e").start();
//!
//!     while let Some(event) = events.recv().await {
//!         if let PollEvent::Updated(report) = event {
//!             println!("{}: {}", report.job_id, report.status);
//!         }
//!     }
//!
//!     println!("{:?}", handle.wait().await);
//! }
//! ```

mod download;
pub mod error;
pub mod gate;
mod jobs;
pub mod poller;
pub mod source;

// Re-export commonly used types
pub use download::Artifact;
pub use error::{ClientError, Result};
pub use gate::{DownloadGate, SavedArtifact};
pub use poller::{PollEvent, PollHandle, PollOutcome, PollStep, StatusPoller};
pub use source::{ArtifactSource, StatusSource};

use reqwest::Client;
use serde::de::DeserializeOwned;
use talkdub_core::dto::job::ErrorBody;

/// Prefix of every jobs API route
pub const API_PREFIX: &str = "/api/v1";

/// HTTP client for the TalkDub jobs API
///
/// - Job submission
/// - Job status snapshots
/// - PIN-authorized artifact download
///
/// No request timeout is configured: requests wait on the transport. Use
/// [`DubbingClient::with_client`] to supply a client with one.
#[derive(Debug, Clone)]
pub struct DubbingClient {
    /// Base URL of the service (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl DubbingClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service (e.g., "http://localhost:8000")
    ///
    /// # Example
    /// ```
    /// use talkdub_client::DubbingClient;
    ///
    /// let client = DubbingClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute URL for an API route
    fn url(&self, route: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, route)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Turn a non-success response into [`ClientError::ApiError`]
    ///
    /// The body's `detail` becomes the message. Bodies that are not the
    /// expected JSON are passed through as text.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|err| err.message())
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| "Unknown error".to_string());

        tracing::debug!("API error (status {}): {}", status, message);
        Err(ClientError::api_error(status.as_u16(), message))
    }
}

//! Job status poller
//!
//! Keeps a view of one job up to date by pulling its status on a fixed
//! interval. One fetch is issued immediately, then one per tick, until the
//! job reaches a terminal status, a fetch fails, or the poller is stopped.
//! There is no retry: the first failure ends polling for good.

use std::sync::Arc;

use talkdub_core::domain::job::JobStatusReport;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::source::StatusSource;

/// Interval between two status fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Result of a single fetch
#[derive(Debug, Clone, PartialEq)]
pub enum PollStep {
    /// Job still moving; keep polling
    Continue(JobStatusReport),
    /// COMPLETED or FAILED; polling must stop
    Terminal(JobStatusReport),
}

impl PollStep {
    pub fn report(&self) -> &JobStatusReport {
        match self {
            PollStep::Continue(report) | PollStep::Terminal(report) => report,
        }
    }
}

/// Emitted by a running poller
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// A snapshot was fetched, including snapshots of failed jobs
    Updated(JobStatusReport),
    /// The fetch itself failed; no further events follow
    Failed(String),
}

/// Why a poller stopped
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Terminal(JobStatusReport),
    Failed(String),
    Stopped,
}

/// Polls the status of a single job
pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    job_id: String,
    interval: Duration,
}

impl StatusPoller {
    /// Creates a poller with the default 10 second interval
    pub fn new(source: Arc<dyn StatusSource>, job_id: impl Into<String>) -> Self {
        Self {
            source,
            job_id: job_id.into(),
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the polling interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Performs a single fetch
    pub async fn fetch_status(&self) -> Result<PollStep> {
        let report = self.source.fetch_status(&self.job_id).await?;

        debug!(
            "Job {} is {} ({:.1}%)",
            self.job_id, report.status, report.progress.percent
        );

        if report.status.is_terminal() {
            Ok(PollStep::Terminal(report))
        } else {
            Ok(PollStep::Continue(report))
        }
    }

    /// Starts polling in a background task
    ///
    /// Returns the handle that controls the task and the stream of events
    /// it produces. The stream closes when polling ends.
    pub fn start(self) -> (PollHandle, mpsc::UnboundedReceiver<PollEvent>) {
        let (stop_tx, stop_rx) = watch::channel(false);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        info!(
            "Starting status poller for job {} (interval: {:?})",
            self.job_id, self.interval
        );

        let task = tokio::spawn(self.run(stop_rx, event_tx));

        (PollHandle { stop_tx, task }, event_rx)
    }

    /// Polling loop
    ///
    /// Fetches run one after another, so a slow response delays the next
    /// tick instead of overlapping with it. An in-flight fetch is never
    /// cancelled; `stop` takes effect at the next tick.
    async fn run(
        self,
        mut stop_rx: watch::Receiver<bool>,
        events: mpsc::UnboundedSender<PollEvent>,
    ) -> PollOutcome {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = stop_rx.changed() => {
                    info!("Status poller for job {} stopped", self.job_id);
                    return PollOutcome::Stopped;
                }
                _ = ticker.tick() => {}
            }

            match self.fetch_status().await {
                Ok(PollStep::Continue(report)) => {
                    let _ = events.send(PollEvent::Updated(report));
                }
                Ok(PollStep::Terminal(report)) => {
                    info!("Job {} reached {}", self.job_id, report.status);
                    let _ = events.send(PollEvent::Updated(report.clone()));
                    return PollOutcome::Terminal(report);
                }
                Err(e) => {
                    let message = e.to_string();
                    warn!("Status fetch for job {} failed: {}", self.job_id, message);
                    let _ = events.send(PollEvent::Failed(message.clone()));
                    return PollOutcome::Failed(message);
                }
            }
        }
    }
}

/// Controls a running [`StatusPoller`]
///
/// Dropping the handle stops the poller at its next tick.
pub struct PollHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<PollOutcome>,
}

impl PollHandle {
    /// Cancels the recurring fetch. Calling it again has no effect.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Whether the polling task is still running
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Waits for polling to end
    pub async fn wait(self) -> PollOutcome {
        let PollHandle { stop_tx, task } = self;
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => PollOutcome::Failed(format!("Status poller task failed: {}", e)),
        };
        drop(stop_tx);
        outcome
    }
}

//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod download;
mod job;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a YouTube video for dubbing
    Submit {
        /// YouTube video URL
        #[arg(long)]
        url: String,

        /// Source language code (see `languages`)
        #[arg(long)]
        src: String,

        /// Target language code (see `languages`)
        #[arg(long)]
        tgt: String,

        /// Address the PIN and completion notice are sent to
        #[arg(long)]
        email: String,

        /// Webhook called when the job finishes
        #[arg(long)]
        webhook: Option<String>,
    },
    /// Show the current status of a job
    Status {
        /// Job ID, /status/{job_id} path or status page URL
        job: String,

        /// Print the raw status snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Follow a job until it completes or fails
    Watch {
        /// Job ID, /status/{job_id} path or status page URL
        job: String,

        /// Prompt for the PIN once the delivery is ready
        #[arg(long)]
        download: bool,
    },
    /// Download the delivery archive of a completed job
    Download {
        /// Job ID, /status/{job_id} path or status page URL
        job: String,

        /// Six-digit PIN from the notification mail (prompted when omitted)
        #[arg(long)]
        pin: Option<String>,
    },
    /// List supported language codes
    Languages,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Submit {
            url,
            src,
            tgt,
            email,
            webhook,
        } => job::submit(config, url, src, tgt, email, webhook).await,
        Commands::Status { job, json } => job::status(config, &job, json).await,
        Commands::Watch { job, download } => job::watch(config, &job, download).await,
        Commands::Download { job, pin } => download::download(config, &job, pin).await,
        Commands::Languages => {
            job::languages();
            Ok(())
        }
    }
}

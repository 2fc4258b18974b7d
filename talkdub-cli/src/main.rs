//! TalkDub CLI
//!
//! Command-line interface for submitting dubbing jobs, following their
//! progress and downloading the finished delivery.

mod commands;
mod config;
mod render;
mod types;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "talkdub")]
#[command(about = "TalkDub multilingual dubbing CLI", long_about = None)]
struct Cli {
    /// Base URL of the TalkDub service
    #[arg(long, env = "TALKDUB_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Seconds between two status fetches
    #[arg(long, global = true, env = "TALKDUB_POLL_INTERVAL", default_value_t = 10)]
    interval: u64,

    /// Directory downloaded archives are saved to
    #[arg(long, global = true, env = "TALKDUB_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talkdub=warn,talkdub_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        poll_interval: Duration::from_secs(cli.interval),
        output_dir: cli.output_dir,
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}

//! Download command handler
//!
//! Runs the PIN gate: a PIN given on the command line gets one attempt,
//! otherwise the PIN is prompted for until the download succeeds or the
//! user enters an empty line.

use anyhow::{Result, anyhow};
use colored::*;
use talkdub_client::gate::SavedArtifact;
use talkdub_client::{ArtifactSource, DownloadGate, DubbingClient};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::Config;
use crate::types::JobRef;

/// Handle `talkdub download`
pub async fn download(config: &Config, job: &str, pin: Option<String>) -> Result<()> {
    let job = JobRef::parse(job)?;
    let client = DubbingClient::new(&config.api_url);

    match pin {
        Some(pin) => {
            let mut gate = DownloadGate::new(job.as_str(), &config.output_dir);
            gate.open();
            match gate.submit(&client, strip_line_ending(&pin)).await {
                Some(saved) => {
                    print_saved(&saved);
                    Ok(())
                }
                None => Err(anyhow!(
                    gate.error().unwrap_or("Download failed").to_string()
                )),
            }
        }
        None => prompt_download(config, &client, job.as_str()).await,
    }
}

/// Prompt for the PIN on stdin until the download succeeds or is abandoned
pub async fn prompt_download(
    config: &Config,
    source: &dyn ArtifactSource,
    job_id: &str,
) -> Result<()> {
    let mut gate = DownloadGate::new(job_id, &config.output_dir);
    gate.open();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while gate.is_open() {
        stdout
            .write_all("PIN (6桁, empty line to cancel): ".as_bytes())
            .await?;
        stdout.flush().await?;

        let input = match lines.next_line().await? {
            Some(line) if !line.trim().is_empty() => line,
            _ => {
                gate.close();
                println!("{}", "Download cancelled.".yellow());
                return Ok(());
            }
        };

        match gate.submit(source, strip_line_ending(&input)).await {
            Some(saved) => print_saved(&saved),
            None => {
                if let Some(error) = gate.error() {
                    eprintln!("{} {}", "✗".red(), error.red());
                }
            }
        }
    }

    Ok(())
}

fn print_saved(saved: &SavedArtifact) {
    println!(
        "{} {} ({} bytes)",
        "✓ Saved".green().bold(),
        saved.path.display(),
        saved.size
    );
    if let Some(count) = saved.download_count {
        println!("  Downloads: {}", count);
    }
    if let Some(expires) = &saved.expires_at {
        println!(
            "  Expires:   {}",
            talkdub_core::view::format_timestamp(expires).dimmed()
        );
    }
}

/// Drop a trailing line terminator; any other whitespace stays part of the PIN
fn strip_line_ending(input: &str) -> &str {
    input.trim_end_matches(['\r', '\n'])
}

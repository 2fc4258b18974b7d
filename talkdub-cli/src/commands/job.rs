//! Job command handlers
//!
//! Handles submission, one-shot status display and following a job
//! until it reaches a terminal status.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use colored::*;
use talkdub_client::{DubbingClient, PollEvent, PollOutcome, StatusPoller};
use talkdub_core::domain::job::JobStatus;
use talkdub_core::form::SubmissionForm;
use talkdub_core::validation::{SUPPORTED_LANGUAGES, ValidationError};
use talkdub_core::view::render_status;
use tracing::debug;

use crate::commands::download;
use crate::config::Config;
use crate::render::{colorize_status, print_status};
use crate::types::JobRef;

/// Validate and submit a new job
pub async fn submit(
    config: &Config,
    url: String,
    src: String,
    tgt: String,
    email: String,
    webhook: Option<String>,
) -> Result<()> {
    let mut form = SubmissionForm {
        video_url: url,
        src_lang: src,
        tgt_lang: tgt,
        email,
        webhook_url: webhook,
    };

    let req = match form.validate() {
        Ok(req) => req,
        Err(ValidationError::SameLanguage) => {
            return Err(anyhow!(
                "{} (source: {}; choose a different --tgt)",
                ValidationError::SameLanguage,
                form.src_lang
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let client = DubbingClient::new(&config.api_url);
    let created = client
        .create_job(req)
        .await
        .context("Failed to submit job")?;

    if created.is_duplicate() {
        println!("{}", "⚠ This video is already queued or processed.".yellow());
    } else {
        println!("{}", "✓ Job accepted".green().bold());
    }
    println!("  ID:      {}", created.job_id.cyan());
    println!(
        "  Status:  {}",
        colorize_status(created.status, created.status.as_str())
    );
    if let Some(eta) = &created.estimated_completion {
        println!("  ETA:     {}", talkdub_core::view::format_timestamp(eta).dimmed());
    }
    if let Some(message) = &created.message {
        println!("  {}", message);
    }
    println!();
    println!(
        "{}",
        format!("Follow progress with: talkdub watch {}", created.job_id).dimmed()
    );

    Ok(())
}

/// Fetch and display the status of a job once
pub async fn status(config: &Config, job: &str, json: bool) -> Result<()> {
    let job = JobRef::parse(job)?;
    let client = DubbingClient::new(&config.api_url);

    let report = client
        .get_job_status(job.as_str())
        .await
        .with_context(|| format!("Failed to fetch status of job {}", job))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_status(&render_status(&report), report.status);
    }

    Ok(())
}

/// Poll a job until it completes, fails or the user interrupts
pub async fn watch(config: &Config, job: &str, then_download: bool) -> Result<()> {
    let job = JobRef::parse(job)?;
    let client = Arc::new(DubbingClient::new(&config.api_url));

    let (handle, mut events) = StatusPoller::new(client.clone(), job.as_str())
        .with_interval(config.poll_interval)
        .start();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(PollEvent::Updated(report)) => {
                    println!("{}", "─".repeat(60).dimmed());
                    print_status(&render_status(&report), report.status);
                }
                Some(PollEvent::Failed(message)) => {
                    debug!("Polling of job {} ended with an error: {}", job, message);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                handle.stop();
            }
        }
    }

    match handle.wait().await {
        PollOutcome::Terminal(report) => {
            if report.status == JobStatus::Completed && report.download_available {
                if then_download {
                    return download::prompt_download(config, &*client, job.as_str()).await;
                }
                println!(
                    "{}",
                    format!("Download with: talkdub download {}", job).dimmed()
                );
            }
            Ok(())
        }
        PollOutcome::Failed(message) => Err(anyhow!(message)),
        PollOutcome::Stopped => {
            println!("{}", "Stopped watching.".yellow());
            Ok(())
        }
    }
}

/// Print the supported language codes
pub fn languages() {
    println!("{}", "Supported languages:".bold());
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {}  {}", code.cyan(), name);
    }
}

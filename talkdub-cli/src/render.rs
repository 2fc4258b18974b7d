//! Terminal rendering of the status view

use colored::*;
use talkdub_core::domain::job::JobStatus;
use talkdub_core::view::StatusView;

const BAR_WIDTH: usize = 30;

/// Print the full status view of a job
pub fn print_status(view: &StatusView, status: JobStatus) {
    println!("{}", "Job Details:".bold());
    println!("  ID:        {}", view.job_id.cyan());
    println!("  Status:    {}", colorize_status(status, &view.badge.text));
    println!("  Phase:     {}", view.phase_label);
    println!("  Created:   {}", view.created_at.dimmed());
    println!("  ETA:       {}", view.eta.dimmed());
    println!(
        "  Progress:  {} {}",
        progress_bar(view.progress.width_percent),
        view.progress.label
    );

    if view.download_visible {
        println!(
            "  Download:  {} {}",
            "✓ available".green(),
            format!("(talkdub download {})", view.job_id).dimmed()
        );
    }

    if let Some(error) = &view.error_banner {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }
}

/// Bar of `BAR_WIDTH` cells filled proportionally to `width_percent`
fn progress_bar(width_percent: f64) -> String {
    let filled = ((width_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}]",
        "█".repeat(filled).green(),
        "░".repeat(BAR_WIDTH - filled).dimmed()
    )
}

/// Colorize job status for display
pub fn colorize_status(status: JobStatus, text: &str) -> ColoredString {
    match status {
        JobStatus::Queued | JobStatus::Pending | JobStatus::AlreadyQueued => text.yellow(),
        JobStatus::Processing => text.cyan(),
        JobStatus::Completed => text.green(),
        JobStatus::Failed => text.red(),
        JobStatus::Paused | JobStatus::Expired | JobStatus::Unknown => text.dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_bounds() {
        colored::control::set_override(false);
        assert_eq!(progress_bar(0.0), format!("[{}]", "░".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(100.0), format!("[{}]", "█".repeat(BAR_WIDTH)));
        assert_eq!(
            progress_bar(50.0),
            format!("[{}{}]", "█".repeat(15), "░".repeat(15))
        );
    }
}

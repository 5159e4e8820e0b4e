//! Status command implementation

use std::path::Path;

use colored::Colorize;
use scriptsync_core::{Project, classify};

use crate::error::Result;

/// Run the status command
pub async fn run_status(cwd: &Path, json: bool) -> Result<()> {
    let project = Project::discover(cwd)?;
    let status = classify(
        project.content_dir(),
        project.rules(),
        project.extensions(),
        &project.collect_options(),
    )
    .await?;

    if json {
        println!("{}", status.to_json()?);
        return Ok(());
    }

    println!("{}", "Tracked files:".bold());
    if status.tracked.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for file in &status.tracked {
        println!("{} {}", "└─".dimmed(), file.local_path);
    }

    println!("{}", "Untracked files:".bold());
    if status.untracked.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for entry in &status.untracked {
        println!("{} {}", "└─".dimmed(), entry.yellow());
    }
    Ok(())
}

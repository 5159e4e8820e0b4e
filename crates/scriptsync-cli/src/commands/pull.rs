//! Pull command implementation

use std::path::Path;

use colored::Colorize;
use scriptsync_core::{DeletionGate, ForceDelete};

use super::open_engine;
use crate::error::Result;
use crate::interactive::PromptGate;

/// Run the pull command
///
/// Deletion of files the remote no longer has happens only with `prune`,
/// after a prompt unless `force` is set.
pub async fn run_pull(
    cwd: &Path,
    remote: Option<&Path>,
    version: Option<u32>,
    prune: bool,
    force: bool,
) -> Result<()> {
    let engine = open_engine(cwd, remote)?;
    let report = engine.pull(version).await?;

    for path in &report.written {
        println!("{} {}", "└─".dimmed(), path);
    }
    for name in &report.placeholders {
        println!("{} {} {}", "└─".dimmed(), name, "(empty, skipped)".dimmed());
    }
    println!(
        "{} Pulled {} file(s).",
        "OK".green().bold(),
        report.written.len()
    );
    for path in &report.untracked {
        println!(
            "{} {} is not tracked by the ignore rules and will not be pushed.",
            "!".yellow().bold(),
            path
        );
    }

    if report.prune.is_empty() {
        return Ok(());
    }
    if !prune {
        println!(
            "{} {} local file(s) no longer exist remotely. Run {} to delete them.",
            "!".yellow().bold(),
            report.prune.paths.len(),
            "ssync pull --prune".cyan()
        );
        return Ok(());
    }

    let gate: &dyn DeletionGate = if force { &ForceDelete } else { &PromptGate };
    let outcome = report.prune.apply(engine.project().content_dir(), gate)?;
    if outcome.declined {
        println!("Nothing deleted.");
    } else {
        for path in &outcome.deleted {
            println!("{} {}", "-".red(), path);
        }
        println!(
            "{} Deleted {} file(s).",
            "OK".green().bold(),
            outcome.deleted.len()
        );
    }
    Ok(())
}

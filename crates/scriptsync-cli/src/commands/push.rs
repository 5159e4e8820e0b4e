//! Push command implementation

use std::path::Path;

use colored::Colorize;
use scriptsync_core::PushReport;
use scriptsync_core::sync::DEFAULT_DEBOUNCE;
use tokio::sync::mpsc;

use super::open_engine;
use crate::error::Result;

/// Run the push command
///
/// With `watch`, keeps pushing after every batch of tracked changes until
/// the process is interrupted.
pub async fn run_push(cwd: &Path, remote: Option<&Path>, watch: bool) -> Result<()> {
    let engine = open_engine(cwd, remote)?;

    let report = engine.push().await?;
    print_report(&report);

    if !watch {
        return Ok(());
    }

    let (tx, rx) = mpsc::channel(16);
    let _watcher = engine.watch(tx)?;
    println!(
        "{} Watching {} for changes (Ctrl+C to stop)",
        "=>".blue().bold(),
        engine.project().content_dir()
    );

    let engine = &engine;
    scriptsync_core::run_push_loop(rx, DEFAULT_DEBOUNCE, move |changed| async move {
        println!(
            "{} {} file(s) changed, pushing...",
            "=>".blue().bold(),
            changed.len()
        );
        match engine.push().await {
            Ok(report) => print_report(&report),
            Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
        }
        Ok(())
    })
    .await;
    Ok(())
}

fn print_report(report: &PushReport) {
    for name in &report.pushed {
        println!("{} {}", "└─".dimmed(), name);
    }
    println!(
        "{} Pushed {} file(s).",
        "OK".green().bold(),
        report.pushed.len()
    );
}

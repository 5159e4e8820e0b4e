//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based confirmation.

use colored::Colorize;
use dialoguer::Confirm;
use scriptsync_core::DeletionGate;
use scriptsync_fs::NormalizedPath;

/// Asks on the terminal before a prune deletes anything.
///
/// A prompt that cannot be shown (no terminal) counts as a refusal.
pub struct PromptGate;

impl DeletionGate for PromptGate {
    fn approve(&self, paths: &[NormalizedPath]) -> bool {
        println!("{}", "These local files no longer exist remotely:".yellow());
        for path in paths {
            println!("  {} {}", "-".red(), path);
        }
        Confirm::new()
            .with_prompt(format!("Delete {} file(s)?", paths.len()))
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

//! scriptsync CLI
//!
//! The command-line interface for syncing a local script project with its
//! remote copy.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;

use std::path::Path;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        for line in e.details() {
            eprintln!("{}", line);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        // No command provided - show help hint
        println!("{} script project sync", "ssync".green().bold());
        println!();
        println!("Run {} for available commands.", "ssync --help".cyan());
        return Ok(());
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(execute_command(command, cli.remote.as_deref()))
}

async fn execute_command(cmd: Commands, remote: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Create {
            script_id,
            title,
            root_dir,
        } => {
            commands::run_create(
                &cwd,
                remote,
                &script_id,
                title.as_deref(),
                root_dir.as_deref(),
            )
            .await
        }
        Commands::Status { json } => commands::run_status(&cwd, json).await,
        Commands::Push { watch } => commands::run_push(&cwd, remote, watch).await,
        Commands::Pull {
            version,
            prune,
            force,
        } => commands::run_pull(&cwd, remote, version, prune, force).await,
        Commands::Version { description } => {
            commands::run_version(&cwd, remote, description.as_deref()).await
        }
        Commands::Versions => commands::run_versions(&cwd, remote).await,
        Commands::Deployments => commands::run_deployments(&cwd, remote).await,
        Commands::Scripts => commands::run_scripts(remote).await,
    }
}

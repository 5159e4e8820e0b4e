//! Listing commands: versions, deployments, scripts

use std::path::Path;

use colored::Colorize;
use scriptsync_core::{Aggregated, Project};

use super::{open_engine, open_remote};
use crate::error::Result;

fn note_partial<T>(listed: &Aggregated<T>) {
    if listed.partial {
        println!(
            "{} Showing the first {} page(s); more results may exist.",
            "!".yellow().bold(),
            listed.pages
        );
    }
}

/// Run the version command
pub async fn run_version(cwd: &Path, remote: Option<&Path>, description: Option<&str>) -> Result<()> {
    let mirror = open_remote(remote)?;
    let project = Project::discover(cwd)?;
    let version = mirror
        .create_version(project.script_id()?, description)
        .await?;
    println!(
        "{} Created version {}",
        "OK".green().bold(),
        version.version_number.to_string().cyan()
    );
    Ok(())
}

/// Run the versions command
pub async fn run_versions(cwd: &Path, remote: Option<&Path>) -> Result<()> {
    let engine = open_engine(cwd, remote)?;
    let listed = engine.versions().await?;

    if listed.results.is_empty() {
        println!("No versions.");
    }
    for version in &listed.results {
        println!(
            "{} - {}",
            version.version_number.to_string().cyan(),
            version.description.as_deref().unwrap_or("No description")
        );
    }
    note_partial(&listed);
    Ok(())
}

/// Run the deployments command
pub async fn run_deployments(cwd: &Path, remote: Option<&Path>) -> Result<()> {
    let engine = open_engine(cwd, remote)?;
    let listed = engine.deployments().await?;

    if listed.results.is_empty() {
        println!("No deployments.");
    }
    for deployment in &listed.results {
        let version = deployment
            .version_number
            .map(|n| format!("@{}", n))
            .unwrap_or_else(|| "@HEAD".to_string());
        println!("- {} {}", deployment.deployment_id, version.cyan());
    }
    note_partial(&listed);
    Ok(())
}

/// Run the scripts command
///
/// Does not need a local project.
pub async fn run_scripts(remote: Option<&Path>) -> Result<()> {
    let mirror = open_remote(remote)?;
    let listed = scriptsync_core::aggregate(Default::default(), |request| {
        scriptsync_core::ScriptService::list_scripts(mirror.as_ref(), request)
    })
    .await?;

    if listed.results.is_empty() {
        println!("No script projects found.");
    }
    for script in &listed.results {
        println!("{} - {}", script.name, script.id.dimmed());
    }
    note_partial(&listed);
    Ok(())
}

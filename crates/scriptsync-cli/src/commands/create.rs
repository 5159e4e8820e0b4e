//! Create command implementation
//!
//! Creates the remote project, seeds it with a manifest and writes the
//! local project config.

use std::path::Path;

use colored::Colorize;
use scriptsync_core::{CONFIG_FILE_NAME, FileType, ProjectConfig, RemoteFile, ScriptService};
use scriptsync_fs::{NormalizedPath, io};

use super::open_remote;
use crate::error::{CliError, Result};

/// Manifest written into new projects.
const DEFAULT_MANIFEST: &str = r#"{
  "timeZone": "Etc/UTC",
  "exceptionLogging": "STACKDRIVER",
  "runtimeVersion": "V8"
}
"#;

/// Run the create command
pub async fn run_create(
    cwd: &Path,
    remote: Option<&Path>,
    script_id: &str,
    title: Option<&str>,
    root_dir: Option<&str>,
) -> Result<()> {
    let config_path = NormalizedPath::new(cwd.join(CONFIG_FILE_NAME));
    if config_path.exists() {
        return Err(CliError::user(format!(
            "Project already exists: {} found in {}",
            CONFIG_FILE_NAME,
            cwd.display()
        )));
    }

    let mirror = open_remote(remote)?;
    let title = title.unwrap_or(script_id);
    println!(
        "{} Creating project {} ({})...",
        "=>".blue().bold(),
        title.cyan(),
        script_id
    );

    mirror.create_project(script_id, title).await?;
    mirror
        .replace_files(
            script_id,
            &[RemoteFile::new("appsscript", FileType::Config, DEFAULT_MANIFEST)],
        )
        .await?;

    let mut config = ProjectConfig::new(script_id);
    config.root_dir = root_dir.map(str::to_string);
    config.save(&config_path)?;

    let content_dir = match root_dir {
        Some(dir) => NormalizedPath::new(cwd.join(dir)),
        None => NormalizedPath::new(cwd),
    };
    let manifest_path = content_dir.join("appsscript.json");
    if !manifest_path.exists() {
        io::write_text(&manifest_path, DEFAULT_MANIFEST).map_err(scriptsync_core::Error::from)?;
    }

    println!("{} Project created!", "OK".green().bold());
    Ok(())
}

//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// scriptsync - Keep a local script project in step with its remote copy
#[derive(Parser, Debug)]
#[command(name = "ssync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the remote projects
    #[arg(long, global = true, env = "SCRIPTSYNC_REMOTE")]
    pub remote: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a remote project and write .clasp.json in the current directory
    ///
    /// Examples:
    ///   ssync create abc123                 # Project titled "abc123"
    ///   ssync create abc123 --title Sheets  # Custom title
    ///   ssync create abc123 --root-dir src  # Sync only src/
    Create {
        /// Remote project id
        script_id: String,

        /// Project title shown in listings
        #[arg(long)]
        title: Option<String>,

        /// Content directory relative to the project root
        #[arg(long)]
        root_dir: Option<String>,
    },

    /// Show tracked and untracked local files
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Replace the remote files with the local ones
    Push {
        /// Keep running and push again whenever a tracked file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Write the remote files into the content directory
    ///
    /// Examples:
    ///   ssync pull                    # Head files
    ///   ssync pull --version 3        # Files of version 3
    ///   ssync pull --prune            # Also delete files gone from the remote
    ///   ssync pull --prune --force    # Delete without asking
    Pull {
        /// Version number to pull instead of head
        #[arg(long)]
        version: Option<u32>,

        /// Delete local files the remote no longer has
        #[arg(long)]
        prune: bool,

        /// Skip the deletion prompt
        #[arg(long, requires = "prune")]
        force: bool,
    },

    /// Snapshot the remote head as a new version
    Version {
        /// Version description
        description: Option<String>,
    },

    /// List versions of the remote project
    Versions,

    /// List deployments of the remote project
    Deployments,

    /// List remote projects
    Scripts,
}

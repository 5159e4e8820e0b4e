//! Project configuration
//!
//! - **project_config**: the persisted `.clasp.json` document
//! - **project**: a loaded project with resolved content dir, ignore rules
//!   and extension map

mod project;
mod project_config;

pub use project::{CONFIG_FILE_NAME, Project};
pub use project_config::ProjectConfig;

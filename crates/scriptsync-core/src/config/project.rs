//! Loaded project: config plus everything derived from it

use std::path::Path;

use scriptsync_fs::NormalizedPath;
use tracing::debug;

use super::ProjectConfig;
use crate::files::{CollectOptions, ExtensionMap, FileType, IgnoreRuleSet, collect};
use crate::{Error, Result};

/// File name of the project config.
pub const CONFIG_FILE_NAME: &str = ".clasp.json";

/// A project loaded for one command invocation.
///
/// Immutable once loaded; every engine call reads from the same rules.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory holding the config file
    root: NormalizedPath,
    config: ProjectConfig,
    /// Absolute content root
    content_dir: NormalizedPath,
    rules: IgnoreRuleSet,
    extensions: ExtensionMap,
}

impl Project {
    /// Find the config file in `start` or the nearest ancestor.
    pub fn find_config(start: &Path) -> Option<NormalizedPath> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
            .map(NormalizedPath::new)
    }

    /// Locate and load the project containing `start`.
    pub fn discover(start: &Path) -> Result<Self> {
        let config_path = Self::find_config(start).ok_or_else(|| Error::ConfigNotFound {
            path: start.to_path_buf(),
        })?;
        Self::load(config_path.as_ref())
    }

    /// Load a project from its config file, using the project's ignore file.
    pub fn load(config_path: &Path) -> Result<Self> {
        Self::load_with_ignore(config_path, None)
    }

    /// Load a project, optionally overriding the ignore file location.
    pub fn load_with_ignore(config_path: &Path, ignore_file: Option<&Path>) -> Result<Self> {
        let config_path = NormalizedPath::new(config_path);
        let config = ProjectConfig::load(&config_path)?;
        let root = config_path
            .parent()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| NormalizedPath::new("."));
        let root = NormalizedPath::canonicalize(root.to_native())?;
        let rules = IgnoreRuleSet::load(root.as_ref(), ignore_file)?;
        Self::from_parts(root, config, rules)
    }

    /// Assemble a project from already-loaded pieces.
    pub fn from_parts(
        root: NormalizedPath,
        config: ProjectConfig,
        rules: IgnoreRuleSet,
    ) -> Result<Self> {
        let extensions = config.extension_map()?;
        let mut content_dir = match config.root_dir.as_deref() {
            None | Some("") => root.clone(),
            Some(dir) if Path::new(dir).is_absolute() => NormalizedPath::new(dir),
            Some(dir) => root.join(dir),
        };
        // `..` must be resolved for relative path arithmetic against walked entries
        if content_dir.has_parent_traversal() && content_dir.exists() {
            content_dir = NormalizedPath::canonicalize(content_dir.to_native())?;
        }

        debug!(root = %root, content_dir = %content_dir, "loaded project");
        Ok(Self {
            root,
            config,
            content_dir,
            rules,
            extensions,
        })
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn config_path(&self) -> NormalizedPath {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn content_dir(&self) -> &NormalizedPath {
        &self.content_dir
    }

    pub fn rules(&self) -> &IgnoreRuleSet {
        &self.rules
    }

    pub fn extensions(&self) -> &ExtensionMap {
        &self.extensions
    }

    /// The remote project id; push and pull cannot run without one.
    pub fn script_id(&self) -> Result<&str> {
        match self.config.script_id.trim() {
            "" => Err(Error::config(
                self.config_path().as_str(),
                "scriptId is required",
            )),
            id => Ok(id),
        }
    }

    /// Collection options derived from the config.
    ///
    /// Push order entries written relative to the project root are
    /// rewritten relative to the content root.
    pub fn collect_options(&self) -> CollectOptions {
        let content_prefix = self.content_dir.relative_to(&self.root);
        let push_order = self
            .config
            .file_push_order
            .iter()
            .map(|entry| {
                let entry = NormalizedPath::new(entry);
                content_prefix
                    .as_ref()
                    .filter(|prefix| !prefix.is_empty())
                    .and_then(|prefix| entry.relative_to(prefix))
                    .unwrap_or(entry)
                    .to_string()
            })
            .collect();

        CollectOptions {
            skip_subdirectories: self.config.skip_subdirectories,
            push_order,
        }
    }

    /// Remote name and type of a content-relative path, if it is tracked.
    pub fn tracked_name(&self, relative: &NormalizedPath) -> Option<(String, FileType)> {
        crate::files::collect::resolve_tracked(
            relative,
            &self.rules,
            &self.extensions,
            &self.collect_options(),
        )
    }

    /// Collect the project's tracked files.
    pub async fn collect(&self) -> Result<Vec<crate::files::ProjectFile>> {
        collect(
            &self.content_dir,
            &self.rules,
            &self.extensions,
            &self.collect_options(),
        )
        .await
    }
}

//! Persisted project settings

use std::collections::BTreeMap;

use scriptsync_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::files::{ExtensionMap, FileType, normalize_extension};
use crate::{Error, Result};

/// Settings stored in the project config file.
///
/// Unknown keys are ignored so configs written by other tools load. They
/// are not kept, so [`ProjectConfig::save`] writes only the fields below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Remote project identifier, required for push and pull
    #[serde(default)]
    pub script_id: String,

    /// Content root relative to the config file's directory
    #[serde(default, alias = "contentDir", skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,

    /// Associated cloud project, kept as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Legacy single script extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,

    /// Per-type extension lists keyed by remote type name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub file_extensions: BTreeMap<String, Vec<String>>,

    /// Files pushed first, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_push_order: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skip_subdirectories: bool,
}

impl ProjectConfig {
    pub fn new(script_id: impl Into<String>) -> Self {
        Self {
            script_id: script_id.into(),
            ..Self::default()
        }
    }

    /// Parse config JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use scriptsync_core::ProjectConfig;
    ///
    /// let config = ProjectConfig::parse(r#"{"scriptId": "abc", "rootDir": "src"}"#).unwrap();
    /// assert_eq!(config.script_id, "abc");
    /// assert_eq!(config.root_dir.as_deref(), Some("src"));
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::config("project config", e.to_string()))
    }

    /// Load from a file; malformed content is a configuration error.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        ConfigStore::new().load(path).map_err(|e| match e {
            scriptsync_fs::Error::ConfigParse { message, .. } => Error::config(path.as_str(), message),
            other if other.is_not_found() => Error::ConfigNotFound {
                path: path.to_native(),
            },
            other => Error::config(path.as_str(), other.to_string()),
        })
    }

    /// Write the config atomically as pretty JSON.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        Ok(())
    }

    /// Build the extension map: defaults, then the legacy single script
    /// extension, then per-type overrides.
    pub fn extension_map(&self) -> Result<ExtensionMap> {
        let mut overrides: BTreeMap<FileType, Vec<String>> = BTreeMap::new();

        if let Some(legacy) = &self.file_extension {
            let preferred = normalize_extension(legacy);
            let defaults = ExtensionMap::default();
            let mut script = vec![preferred.clone()];
            script.extend(
                defaults
                    .extensions_for(FileType::Script)
                    .iter()
                    .filter(|ext| **ext != preferred)
                    .cloned(),
            );
            overrides.insert(FileType::Script, script);
        }

        for (key, extensions) in &self.file_extensions {
            let file_type: FileType = key
                .parse()
                .map_err(|_| Error::config("fileExtensions", format!("unknown file type '{}'", key)))?;
            overrides.insert(file_type, extensions.clone());
        }

        ExtensionMap::with_overrides(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_full_config() {
        let config = ProjectConfig::parse(
            r#"{
                "scriptId": "1abc",
                "rootDir": "src",
                "projectId": "my-project",
                "fileExtensions": {"SERVER_JS": [".gs"], "HTML": [".htm", ".html"]},
                "filePushOrder": ["src/first.gs"],
                "skipSubdirectories": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.script_id, "1abc");
        assert_eq!(config.root_dir.as_deref(), Some("src"));
        assert_eq!(config.file_push_order, vec!["src/first.gs".to_string()]);
        assert!(config.skip_subdirectories);

        let map = config.extension_map().unwrap();
        assert_eq!(map.preferred_extension(FileType::Script), Some(".gs"));
        assert_eq!(map.type_of("js"), None);
        assert_eq!(map.preferred_extension(FileType::Markup), Some(".htm"));
        assert_eq!(map.preferred_extension(FileType::Config), Some(".json"));
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let config =
            ProjectConfig::parse(r#"{"scriptId": "x", "parentId": ["folder"], "projectId": "p"}"#)
                .unwrap();
        let written = serde_json::to_value(&config).unwrap();
        assert_eq!(
            written,
            serde_json::json!({"scriptId": "x", "projectId": "p"})
        );
    }

    #[test]
    fn content_dir_alias() {
        let config = ProjectConfig::parse(r#"{"scriptId": "x", "contentDir": "app"}"#).unwrap();
        assert_eq!(config.root_dir.as_deref(), Some("app"));
    }

    #[test]
    fn legacy_extension_becomes_preferred() {
        let config = ProjectConfig::parse(r#"{"scriptId": "x", "fileExtension": "gs"}"#).unwrap();
        let map = config.extension_map().unwrap();
        assert_eq!(map.extensions_for(FileType::Script), [".gs", ".js"]);
    }

    #[test]
    fn unknown_type_key_is_config_error() {
        let config = ProjectConfig::parse(r#"{"fileExtensions": {"PYTHON": [".py"]}}"#).unwrap();
        assert!(matches!(config.extension_map(), Err(Error::Config { .. })));
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(ProjectConfig::parse("{"), Err(Error::Config { .. })));
    }
}

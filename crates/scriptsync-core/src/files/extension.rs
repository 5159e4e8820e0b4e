//! Extension-based type resolution
//!
//! Every type has an ordered list of accepted extensions. All of them are
//! recognized when reading local files; the first one names files written
//! by a pull.

use std::collections::BTreeMap;

use scriptsync_fs::NormalizedPath;

use super::FileType;
use crate::{Error, Result};

const ORIGIN: &str = "fileExtensions";

/// Per-type ordered extension lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMap {
    entries: BTreeMap<FileType, Vec<String>>,
}

impl Default for ExtensionMap {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(FileType::Script, vec![".js".to_string(), ".gs".to_string()]);
        entries.insert(FileType::Markup, vec![".html".to_string()]);
        entries.insert(FileType::Config, vec![".json".to_string()]);
        Self { entries }
    }
}

/// Lowercase an extension and give it a leading dot.
///
/// ```
/// use scriptsync_core::files::normalize_extension;
///
/// assert_eq!(normalize_extension("GS"), ".gs");
/// assert_eq!(normalize_extension(".Js"), ".js");
/// ```
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().trim_start_matches('.');
    format!(".{}", trimmed.to_lowercase())
}

impl ExtensionMap {
    /// Build a map from explicit per-type lists.
    ///
    /// Types that are not listed have no extensions. Fails when an
    /// extension is malformed or registered for two different types.
    pub fn new(entries: impl IntoIterator<Item = (FileType, Vec<String>)>) -> Result<Self> {
        let mut map = Self {
            entries: BTreeMap::new(),
        };
        for (file_type, extensions) in entries {
            map.set(file_type, extensions)?;
        }
        Ok(map)
    }

    /// Start from the defaults and replace the lists of the given types.
    pub fn with_overrides(
        overrides: impl IntoIterator<Item = (FileType, Vec<String>)>,
    ) -> Result<Self> {
        let overrides: Vec<_> = overrides.into_iter().collect();
        let mut map = Self::default();
        // Overridden lists are cleared first so swapping extensions between types works
        for (file_type, _) in &overrides {
            map.entries.remove(file_type);
        }
        for (file_type, extensions) in overrides {
            map.set(file_type, extensions)?;
        }
        Ok(map)
    }

    /// Replace the extension list for one type.
    pub fn set(&mut self, file_type: FileType, extensions: Vec<String>) -> Result<()> {
        let mut normalized: Vec<String> = Vec::with_capacity(extensions.len());
        for raw in extensions {
            let ext = normalize_extension(&raw);
            if ext.len() < 2 || ext.contains('/') || ext.contains('\\') || ext[1..].contains('.')
            {
                return Err(Error::config(
                    ORIGIN,
                    format!("invalid extension '{}' for {}", raw, file_type),
                ));
            }
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }

        for ext in &normalized {
            let owner = self
                .entries
                .iter()
                .find(|(t, list)| **t != file_type && list.contains(ext));
            if let Some((other, _)) = owner {
                return Err(Error::config(
                    ORIGIN,
                    format!("extension '{}' is registered for both {} and {}", ext, other, file_type),
                ));
            }
        }

        self.entries.insert(file_type, normalized);
        Ok(())
    }

    /// Resolve a type from an extension, with or without the leading dot.
    pub fn type_of(&self, extension: &str) -> Option<FileType> {
        let ext = normalize_extension(extension);
        self.entries
            .iter()
            .find(|(_, list)| list.contains(&ext))
            .map(|(file_type, _)| *file_type)
    }

    /// All accepted extensions for a type, preferred first.
    pub fn extensions_for(&self, file_type: FileType) -> &[String] {
        self.entries
            .get(&file_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The extension used when writing files of this type.
    pub fn preferred_extension(&self, file_type: FileType) -> Option<&str> {
        self.extensions_for(file_type).first().map(String::as_str)
    }

    /// Split a relative path into its remote name and type.
    ///
    /// Returns `None` for files whose extension is not registered.
    pub fn resolve(&self, path: &NormalizedPath) -> Option<(String, FileType)> {
        let file_type = self.type_of(path.extension()?)?;
        Some((path.without_extension(), file_type))
    }
}

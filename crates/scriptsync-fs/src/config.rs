//! JSON configuration loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Configuration store for JSON documents.
///
/// The format is checked against the file extension so a mistyped path
/// fails loudly instead of being parsed as the wrong format.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    /// Create a new ConfigStore.
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a `.json` file (dotfiles such as
    /// `.clasp.json` included).
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        check_format(path)?;
        let content = io::read_text(path)?;
        self.parse(path, &content)
    }

    /// Parse already-read content as if it came from `path`.
    pub fn parse<T: DeserializeOwned>(&self, path: &NormalizedPath, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: "JSON".into(),
            message: e.to_string(),
        })
    }

    /// Save configuration as pretty-printed JSON.
    ///
    /// Uses atomic write to prevent corruption.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        check_format(path)?;
        let mut content =
            serde_json::to_string_pretty(value).map_err(|e| Error::ConfigSerialize {
                path: path.to_native(),
                format: "JSON".into(),
                message: e.to_string(),
            })?;
        content.push('\n');
        io::write_atomic(path, content.as_bytes())
    }
}

fn check_format(path: &NormalizedPath) -> Result<()> {
    let extension = path.extension().unwrap_or("");
    if extension.eq_ignore_ascii_case("json") {
        Ok(())
    } else {
        Err(Error::UnsupportedFormat {
            extension: extension.to_string(),
        })
    }
}

use std::fmt;
use std::str::FromStr;

use scriptsync_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Remote name of the project manifest.
pub const MANIFEST_NAME: &str = "appsscript";

/// Logical type of a project file.
///
/// Serialized with the remote API's spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FileType {
    /// Server-side script source
    #[serde(rename = "SERVER_JS")]
    Script,
    /// HTML markup
    #[serde(rename = "HTML")]
    Markup,
    /// JSON configuration (the manifest)
    #[serde(rename = "JSON")]
    Config,
}

impl FileType {
    pub const ALL: [FileType; 3] = [FileType::Script, FileType::Markup, FileType::Config];

    /// The remote API's name for this type.
    pub fn as_remote_str(&self) -> &'static str {
        match self {
            Self::Script => "SERVER_JS",
            Self::Markup => "HTML",
            Self::Config => "JSON",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_remote_str())
    }
}

impl FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SERVER_JS" | "SCRIPT" => Ok(Self::Script),
            "HTML" | "MARKUP" => Ok(Self::Markup),
            "JSON" | "CONFIG" => Ok(Self::Config),
            _ => Err(Error::config("file type", format!("unknown file type '{}'", s))),
        }
    }
}

/// One logical unit of source.
///
/// Built fresh by every collection or mapping call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    /// Slash-separated, extension-free name unique within a snapshot
    pub remote_name: String,
    /// Path relative to the content root, with extension
    pub local_path: NormalizedPath,
    pub file_type: FileType,
    pub source: String,
}

impl ProjectFile {
    pub fn new(
        remote_name: impl Into<String>,
        local_path: impl Into<NormalizedPath>,
        file_type: FileType,
        source: impl Into<String>,
    ) -> Self {
        Self {
            remote_name: remote_name.into(),
            local_path: local_path.into(),
            file_type,
            source: source.into(),
        }
    }

    /// Empty remote files are kept as placeholders and never written locally.
    pub fn is_placeholder(&self) -> bool {
        self.source.is_empty()
    }

    pub fn is_manifest(&self) -> bool {
        self.file_type == FileType::Config && self.remote_name == MANIFEST_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_uses_remote_spelling() {
        let json = serde_json::to_string(&FileType::Script).unwrap();
        assert_eq!(json, "\"SERVER_JS\"");
        let parsed: FileType = serde_json::from_str("\"HTML\"").unwrap();
        assert_eq!(parsed, FileType::Markup);
    }

    #[test]
    fn file_type_parses_both_spellings() {
        assert_eq!("json".parse::<FileType>().unwrap(), FileType::Config);
        assert_eq!("Script".parse::<FileType>().unwrap(), FileType::Script);
        assert!("GS".parse::<FileType>().is_err());
    }
}

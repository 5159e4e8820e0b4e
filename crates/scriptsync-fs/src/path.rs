//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Backslashes become forward slashes, repeated separators and `.`
/// segments are dropped, and trailing separators are trimmed. `..`
/// segments are kept verbatim so callers can reject them.
/// Conversion to a platform-native path happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        Self { inner: clean(&raw) }
    }

    /// Resolve symlinks and `..` against the filesystem.
    ///
    /// Uses `dunce` so Windows paths stay free of the `\\?\` prefix.
    pub fn canonicalize(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resolved = dunce::canonicalize(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::new(resolved))
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// True for the empty relative path (the root it is relative to).
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        let segment = segment.as_ref().to_string_lossy().replace('\\', "/");
        if self.inner.is_empty() {
            return Self { inner: clean(&segment) };
        }
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment)),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        match self.inner.rfind('/') {
            Some(0) if self.inner.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            Some(0) => None,
            Some(idx) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            None if self.inner.is_empty() => None,
            None => Some(Self {
                inner: String::new(),
            }),
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Iterate over the `/`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|s| !s.is_empty())
    }

    /// The first segment, if any.
    pub fn first_segment(&self) -> Option<&str> {
        self.segments().next()
    }

    /// True when the path starts at the filesystem root.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || self.to_native().is_absolute()
    }

    /// True when any segment is `..`.
    pub fn has_parent_traversal(&self) -> bool {
        self.segments().any(|s| s == "..")
    }

    /// Express this path relative to `base`.
    ///
    /// Returns `None` when the path does not live under `base`.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<Self> {
        if base.inner.is_empty() {
            return Some(self.clone());
        }
        if self.inner == base.inner {
            return Some(Self {
                inner: String::new(),
            });
        }
        let prefix = if base.inner.ends_with('/') {
            base.inner.clone()
        } else {
            format!("{}/", base.inner)
        };
        self.inner.strip_prefix(&prefix).map(|rest| Self {
            inner: rest.to_string(),
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Get the extension if present, without the leading dot.
    ///
    /// Dotfiles such as `.env` have no extension.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// The path with the final extension of its file name removed.
    pub fn without_extension(&self) -> String {
        match self.extension() {
            Some(ext) => self.inner[..self.inner.len() - ext.len() - 1].to_string(),
            None => self.inner.clone(),
        }
    }
}

fn clean(raw: &str) -> String {
    let absolute = raw.starts_with('/');
    let body = raw
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/");
    if absolute { format!("/{}", body) } else { body }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_to_strips_base() {
        let base = NormalizedPath::new("/work/project");
        let file = NormalizedPath::new("/work/project/src/Code.js");
        assert_eq!(file.relative_to(&base).unwrap().as_str(), "src/Code.js");
    }

    #[test]
    fn relative_to_rejects_sibling_prefix() {
        let base = NormalizedPath::new("/work/project");
        let file = NormalizedPath::new("/work/project-other/Code.js");
        assert!(file.relative_to(&base).is_none());
    }

    #[test]
    fn without_extension_keeps_inner_dots() {
        let path = NormalizedPath::new("lib/foo.server.js");
        assert_eq!(path.without_extension(), "lib/foo.server");
    }

    #[test]
    fn dotfile_has_no_extension() {
        let path = NormalizedPath::new("dir/.env");
        assert_eq!(path.extension(), None);
        assert_eq!(path.without_extension(), "dir/.env");
    }

    #[test]
    fn parent_of_single_segment_is_empty() {
        let path = NormalizedPath::new("Code.js");
        assert_eq!(path.parent().unwrap().as_str(), "");
        assert!(NormalizedPath::new("").parent().is_none());
    }
}

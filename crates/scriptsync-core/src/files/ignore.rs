//! Ignore rules with gitignore semantics
//!
//! Patterns are matched against `/`-separated paths relative to the
//! content root. Later patterns win over earlier ones and `!` re-includes.
//!
//! Three sources are distinguished:
//! - no ignore file: [`DEFAULT_IGNORE_PATTERNS`]
//! - an ignore file: exactly its patterns, so an empty file ignores nothing
//! - inline patterns via [`IgnoreRuleSet::from_patterns`]

use std::fs;
use std::path::Path;

use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use scriptsync_fs::NormalizedPath;
use tracing::debug;

use crate::{Error, Result};

/// Ignore file looked up next to the project config.
pub const IGNORE_FILE_NAME: &str = ".claspignore";

/// Rules used when the project has no ignore file.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "**/**",
    "!**/appsscript.json",
    "!**/*.gs",
    "!**/*.js",
    "!**/*.ts",
    "!**/*.html",
    ".git/**",
    "node_modules/**",
];

/// Outcome of matching one path against a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreDecision {
    /// The last matching pattern excludes the path
    Excluded,
    /// The last matching pattern is a `!` negation
    Included,
    /// No pattern matched
    Unmatched,
}

/// Where a rule set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOrigin {
    Defaults,
    File(NormalizedPath),
    Inline,
}

/// Ordered, compiled ignore patterns.
#[derive(Debug, Clone)]
pub struct IgnoreRuleSet {
    patterns: Vec<String>,
    matcher: Gitignore,
    origin: RuleOrigin,
}

impl IgnoreRuleSet {
    /// A rule set that ignores nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            matcher: Gitignore::empty(),
            origin: RuleOrigin::Inline,
        }
    }

    /// The built-in rule set.
    pub fn defaults() -> Result<Self> {
        let mut rules = Self::from_patterns(DEFAULT_IGNORE_PATTERNS.iter().copied())?;
        rules.origin = RuleOrigin::Defaults;
        Ok(rules)
    }

    /// Compile patterns in order. Blank lines and `#` comments are skipped.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::compile(patterns, RuleOrigin::Inline)
    }

    /// Load the rules for a project.
    ///
    /// An explicitly supplied file must be readable. Without one, the
    /// project's ignore file is used when present and the defaults otherwise.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = project_root.join(IGNORE_FILE_NAME);
                if !candidate.exists() {
                    debug!(root = %project_root.display(), "no ignore file, using defaults");
                    return Self::defaults();
                }
                candidate
            }
        };

        let origin = NormalizedPath::new(&path);
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::config(origin.as_str(), format!("cannot read ignore file: {}", e)))?;

        let rules = Self::compile(content.lines(), RuleOrigin::File(origin))?;
        debug!(patterns = rules.patterns.len(), "loaded ignore file");
        Ok(rules)
    }

    fn compile<I, S>(patterns: I, origin: RuleOrigin) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let origin_name = match &origin {
            RuleOrigin::Defaults => "default ignore rules".to_string(),
            RuleOrigin::File(path) => path.to_string(),
            RuleOrigin::Inline => "ignore patterns".to_string(),
        };

        let mut builder = GitignoreBuilder::new(".");
        let mut kept = Vec::new();
        for pattern in patterns {
            let line = pattern.as_ref().trim_end();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, line)
                .map_err(|e| Error::config(&origin_name, e.to_string()))?;
            kept.push(line.to_string());
        }
        let matcher = builder
            .build()
            .map_err(|e| Error::config(&origin_name, e.to_string()))?;

        Ok(Self {
            patterns: kept,
            matcher,
            origin,
        })
    }

    /// The effective patterns in order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn origin(&self) -> &RuleOrigin {
        &self.origin
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Match a file path relative to the content root.
    ///
    /// When the path itself matches no pattern its parent directories are
    /// consulted, so `node_modules/` excludes everything beneath it.
    pub fn decision(&self, relative: &NormalizedPath) -> IgnoreDecision {
        match self.matched(relative) {
            Match::None => IgnoreDecision::Unmatched,
            Match::Ignore(_) => IgnoreDecision::Excluded,
            Match::Whitelist(_) => IgnoreDecision::Included,
        }
    }

    /// True when the path is excluded.
    pub fn matches(&self, relative: &NormalizedPath) -> bool {
        self.decision(relative) == IgnoreDecision::Excluded
    }

    /// True when a negation pattern naming the path's top segment
    /// re-includes it.
    ///
    /// Generic negations such as `!**/*.js` do not count, so hidden
    /// directories stay out unless a pattern asks for them by name.
    pub fn explicitly_includes(&self, relative: &NormalizedPath) -> bool {
        let Some(top) = relative.first_segment() else {
            return false;
        };
        match self.matched(relative) {
            Match::Whitelist(glob) => named_segment(glob.original()) == Some(top),
            _ => false,
        }
    }

    fn matched(&self, relative: &NormalizedPath) -> Match<&ignore::gitignore::Glob> {
        if self.is_empty() || relative.is_empty() || relative.is_absolute() {
            return Match::None;
        }
        self.matcher
            .matched_path_or_any_parents(relative.as_str(), false)
    }
}

/// First literal path segment of a pattern, skipping `!`, a leading `/`
/// and leading `**` segments.
fn named_segment(pattern: &str) -> Option<&str> {
    pattern
        .trim_start_matches('!')
        .trim_start_matches('/')
        .split('/')
        .find(|segment| *segment != "**")
        .filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> NormalizedPath {
        NormalizedPath::new(p)
    }

    #[test]
    fn later_negation_wins() {
        let rules = IgnoreRuleSet::from_patterns(["**/*.log", "!keep.log"]).unwrap();
        assert!(rules.matches(&path("a.log")));
        assert!(!rules.matches(&path("keep.log")));
        assert_eq!(rules.decision(&path("keep.log")), IgnoreDecision::Included);
    }

    #[test]
    fn defaults_keep_sources_and_manifest() {
        let rules = IgnoreRuleSet::defaults().unwrap();
        assert!(!rules.matches(&path("appsscript.json")));
        assert!(!rules.matches(&path("sub/Code.js")));
        assert!(!rules.matches(&path("page.html")));
        assert!(rules.matches(&path("README.md")));
        assert!(rules.matches(&path("package.json")));
        assert!(rules.matches(&path("node_modules/pkg/index.js")));
        assert!(rules.matches(&path(".git/config")));
    }

    #[test]
    fn directory_pattern_excludes_descendants() {
        let rules = IgnoreRuleSet::from_patterns(["build/"]).unwrap();
        assert!(rules.matches(&path("build/out/Code.js")));
        assert!(!rules.matches(&path("src/build.js")));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let rules = IgnoreRuleSet::from_patterns(["# comment", "", "   "]).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn generic_negation_is_not_explicit() {
        let rules = IgnoreRuleSet::defaults().unwrap();
        assert!(!rules.explicitly_includes(&path(".hidden/Code.js")));

        let rules = IgnoreRuleSet::from_patterns(["!.hidden/**"]).unwrap();
        assert!(rules.explicitly_includes(&path(".hidden/Code.js")));
    }

    #[test]
    fn short_hidden_segment_is_not_named_by_extension_glob() {
        let rules = IgnoreRuleSet::defaults().unwrap();
        assert!(!rules.explicitly_includes(&path(".h/page.html")));
        assert!(!rules.explicitly_includes(&path(".j/x.js")));
    }

    #[test]
    fn named_segment_skips_anchors() {
        assert_eq!(named_segment("!/.shared/**"), Some(".shared"));
        assert_eq!(named_segment("!**/.shared/*.js"), Some(".shared"));
        assert_eq!(named_segment("!**/*.js"), Some("*.js"));
    }
}

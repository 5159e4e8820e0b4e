//! Local file model: types, extension mapping, ignore rules and collection

pub mod collect;
pub mod extension;
pub mod ignore;
mod types;

pub use collect::{CollectOptions, collect, order_for_push};
pub use extension::{ExtensionMap, normalize_extension};
pub use ignore::{DEFAULT_IGNORE_PATTERNS, IGNORE_FILE_NAME, IgnoreDecision, IgnoreRuleSet};
pub use types::{FileType, MANIFEST_NAME, ProjectFile};

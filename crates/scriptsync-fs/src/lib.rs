//! Filesystem primitives for scriptsync
//!
//! Provides separator-agnostic path handling, atomic writes and
//! JSON configuration persistence.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;

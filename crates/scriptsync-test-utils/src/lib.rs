//! Shared test utilities for the scriptsync workspace.
//!
//! This crate provides standardised project fixtures to eliminate
//! duplication across crate test suites. It is a dev-dependency only and
//! never published.
//!
//! # Modules
//!
//! - [`project`] — [`TestProject`](project::TestProject) builder for local project trees

pub mod project;

pub use project::TestProject;

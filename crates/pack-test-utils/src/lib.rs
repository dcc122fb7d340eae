//! Shared test utilities for the Pack workspace.
//!
//! Standard fixtures used across crate test suites. Dev-dependency only,
//! never published.
//!
//! # Modules
//!
//! - [`fixtures`] - canned `pyproject.toml` and path index documents
//! - [`project`] - [`TestProject`](project::TestProject) builder for a
//!   temporary project directory

pub mod fixtures;
pub mod project;

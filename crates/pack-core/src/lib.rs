//! Build-lifecycle layer for Pack
//!
//! Sits between the configuration engine and the CLI:
//!
//! - **Projects**: locate `pyproject.toml` and run the full resolution
//!   pipeline for a target
//! - **Bundles**: where each app's build bundle lives
//! - **Path indexes**: the generated `pack.toml` of a bundle, read once and
//!   cached for the rest of the process
//!
//! ```text
//!          pack-cli
//!              |
//!          pack-core
//!              |
//!     +--------+--------+
//!     |                 |
//! pack-config        pack-fs
//! ```

pub mod bundle;
pub mod error;
pub mod path_index;
pub mod project;

pub use bundle::{BundleLayout, PATH_INDEX_FILE};
pub use error::{Error, Result};
pub use path_index::{ImageTargets, PathIndex, PathIndexCache};
pub use project::{PYPROJECT_FILE, Project, ResolvedProject};

//! Filesystem abstraction for Pack
//!
//! Provides normalized path handling, text reads that report the offending
//! path on failure, and format-detecting config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;

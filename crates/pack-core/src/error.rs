//! Error types for pack-core

use std::path::PathBuf;

/// Result type for pack-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a project or its build bundles
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No `pyproject.toml` in the directory or any of its parents
    #[error(
        "Unable to find a pyproject.toml in {start} or any parent directory.\n\n\
         Run this command from the root of a Pack project, or pass --project."
    )]
    ProjectNotFound { start: PathBuf },

    /// The path index of a bundle has not been generated yet
    #[error("Unable to find '{}'", path.display())]
    MissingPathIndex { path: PathBuf },

    /// The path index exists but lacks required roles or is malformed
    #[error("Invalid path index '{}': {message}", path.display())]
    InvalidPathIndex { path: PathBuf, message: String },

    #[error("Unknown platform {platform:?}. Known platforms: {known}")]
    UnknownPlatform { platform: String, known: String },

    #[error("Unknown output format {format:?} for {platform}. Known formats: {known}")]
    UnknownFormat {
        platform: String,
        format: String,
        known: String,
    },

    /// The app is not declared for the requested target
    #[error("App {app:?} is not defined for {platform} {format}")]
    AppNotFound {
        app: String,
        platform: String,
        format: String,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from pack-fs
    #[error(transparent)]
    Fs(#[from] pack_fs::Error),

    /// Configuration error from pack-config
    #[error(transparent)]
    Config(#[from] pack_config::Error),
}

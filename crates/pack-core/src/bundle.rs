//! Locations of per-app build bundles

use pack_fs::NormalizedPath;

/// Name of the path index file generated inside every bundle.
pub const PATH_INDEX_FILE: &str = "pack.toml";

/// Maps (app, platform, format) targets to bundle directories.
///
/// ```text
/// {project}/
/// └── build/
///     └── {app}/
///         └── {platform}/
///             └── {format}/   # bundle, holds pack.toml
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    build_dir: NormalizedPath,
}

impl BundleLayout {
    /// Layout rooted at `<project_dir>/build`.
    pub fn new(project_dir: &NormalizedPath) -> Self {
        Self {
            build_dir: project_dir.join("build"),
        }
    }

    pub fn build_dir(&self) -> &NormalizedPath {
        &self.build_dir
    }

    /// Bundle directory of one app for one target.
    ///
    /// Platform and format are lowercased so `macOS`/`Xcode` land in
    /// `macos/xcode`.
    pub fn bundle_path(&self, app: &str, platform: &str, format: &str) -> NormalizedPath {
        self.build_dir
            .join(app)
            .join(&platform.to_lowercase())
            .join(&format.to_lowercase())
    }

    pub fn path_index_path(&self, app: &str, platform: &str, format: &str) -> NormalizedPath {
        self.bundle_path(app, platform, format).join(PATH_INDEX_FILE)
    }
}

//! Project loading and the full configuration pipeline
//!
//! A [`Project`] is a directory holding `pyproject.toml`. Resolving it for a
//! target runs every stage of the engine in order:
//!
//! 1. parse the document and layer each app's scopes
//! 2. merge the PEP 621 `[project]` table into every app
//! 3. validate every app's document types for the target platform

use std::collections::BTreeMap;
use std::path::Path;

use pack_config::{
    AppConfig, DocumentTypeValidator, GlobalOptions, PlatformRegistry, ProjectMetadata,
    RawDocument, ResolvedAppConfig,
};
use pack_fs::{NormalizedPath, io};
use serde::Serialize;

use crate::bundle::BundleLayout;
use crate::path_index::PathIndexCache;
use crate::{Error, Result};

/// Name of the project description file.
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Global options and per-app configuration for one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedProject {
    pub global: GlobalOptions,
    pub apps: BTreeMap<String, ResolvedAppConfig>,
}

/// A loaded project description.
#[derive(Debug, Clone)]
pub struct Project {
    root: NormalizedPath,
    document: RawDocument,
    registry: PlatformRegistry,
}

impl Project {
    /// Find the closest `pyproject.toml` at or above `start` and load it.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let start = NormalizedPath::canonicalize(start.as_ref())?;
        let mut current = Some(start.clone());

        while let Some(dir) = current {
            if dir.join(PYPROJECT_FILE).is_file() {
                tracing::debug!(root = %dir, "Found project");
                return Self::load(&dir);
            }
            current = dir.parent();
        }

        Err(Error::ProjectNotFound {
            start: start.to_native(),
        })
    }

    /// Load the `pyproject.toml` in `root`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = NormalizedPath::new(root.as_ref());
        let file = root.join(PYPROJECT_FILE);
        let text = io::read_text_if_exists(&file)?.ok_or_else(|| Error::ProjectNotFound {
            start: root.to_native(),
        })?;
        Self::from_text(root, &text)
    }

    /// Build a project from document text, as if read from `root`.
    pub fn from_text(root: NormalizedPath, text: &str) -> Result<Self> {
        Ok(Self {
            root,
            document: RawDocument::parse(text)?,
            registry: PlatformRegistry::with_builtins(),
        })
    }

    /// Replace the builtin platform registry.
    pub fn with_registry(mut self, registry: PlatformRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    pub fn document(&self) -> &RawDocument {
        &self.document
    }

    pub fn bundle_layout(&self) -> BundleLayout {
        BundleLayout::new(&self.root)
    }

    /// A path index cache for the bundles of one target.
    pub fn path_index_cache(&self, platform: &str, output_format: &str) -> PathIndexCache {
        PathIndexCache::new(self.bundle_layout(), platform, output_format)
    }

    /// Check a target against the registry, filling in the default format.
    pub fn target(&self, platform: &str, output_format: Option<&str>) -> Result<(String, String)> {
        let default_format =
            self.registry
                .default_format(platform)
                .ok_or_else(|| Error::UnknownPlatform {
                    platform: platform.to_string(),
                    known: self.registry.platforms().collect::<Vec<_>>().join(", "),
                })?;

        let output_format = output_format.unwrap_or(default_format);
        if !self.registry.is_format(platform, output_format) {
            return Err(Error::UnknownFormat {
                platform: platform.to_string(),
                format: output_format.to_string(),
                known: self.registry.formats(platform).join(", "),
            });
        }

        Ok((platform.to_string(), output_format.to_string()))
    }

    /// Resolve global options and every app for one target.
    pub fn resolve(&self, platform: &str, output_format: &str) -> Result<ResolvedProject> {
        let (global, mut apps) = self
            .document
            .resolve(&self.registry, platform, output_format)?;

        if let Some(pep621) = self.document.project_section()? {
            let metadata = ProjectMetadata::new(pep621, &self.root.to_native())?;
            for (name, app) in apps.iter_mut() {
                tracing::debug!(app = %name, "Merging PEP 621 metadata");
                metadata.merge_into(app.as_map_mut())?;
            }
        }

        let validator = DocumentTypeValidator::new(&self.registry, platform);
        for app in apps.values_mut() {
            validator.validate_app(app.as_map_mut())?;
        }

        Ok(ResolvedProject { global, apps })
    }

    /// The typed configuration of one app for one target.
    pub fn app_config(&self, app: &str, platform: &str, output_format: &str) -> Result<AppConfig> {
        let resolved = self.resolve(platform, output_format)?;
        let config = resolved.apps.get(app).ok_or_else(|| Error::AppNotFound {
            app: app.to_string(),
            platform: platform.to_string(),
            format: output_format.to_string(),
        })?;
        Ok(AppConfig::from_resolved(config)?)
    }
}

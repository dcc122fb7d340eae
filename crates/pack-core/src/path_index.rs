//! Bundle path index and its process-lifetime cache
//!
//! Creating a bundle writes a small `pack.toml` into it. Its `[paths]` table
//! names where the app code, installed dependencies and support package go:
//!
//! ```toml
//! [paths]
//! app_path = "src/app"
//! app_packages_path = "src/app_packages"
//! support_path = "support"
//! support_revision = 3
//! cleanup_paths = ["support/**/tests"]
//! icon = { 16 = "icon-16.png", 32 = "icon-32.png" }
//! splash = "splash.png"
//!
//! [paths.document_type_icon]
//! mydoc = "mydoc.png"
//! ```
//!
//! The file is read once per app and then served from memory. Cleanup steps
//! often delete it before later lookups, so the cache never re-reads.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use pack_fs::{ConfigStore, NormalizedPath};
use serde::Deserialize;

use crate::bundle::{BundleLayout, PATH_INDEX_FILE};
use crate::{Error, Result};

/// Image paths keyed by size; `None` is an unsized image.
pub type ImageTargets = BTreeMap<Option<String>, NormalizedPath>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct IndexFile {
    paths: IndexPaths,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct IndexPaths {
    app_path: String,
    app_packages_path: Option<String>,
    support_path: Option<String>,
    support_revision: Option<Revision>,
    #[serde(default)]
    cleanup_paths: Vec<String>,
    icon: Option<ImageSpec>,
    splash: Option<ImageSpec>,
    #[serde(default)]
    document_type_icon: BTreeMap<String, ImageSpec>,
    #[serde(flatten)]
    extra: toml::Table,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum Revision {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ImageSpec {
    Single(String),
    Sized(BTreeMap<String, String>),
}

/// The parsed path index of one bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct PathIndex {
    bundle_path: NormalizedPath,
    paths: IndexPaths,
}

impl PathIndex {
    /// Read `pack.toml` from a bundle directory.
    pub fn load(bundle_path: &NormalizedPath) -> Result<Self> {
        let file = bundle_path.join(PATH_INDEX_FILE);
        let index: IndexFile = ConfigStore::new().load(&file).map_err(|e| match e {
            e if e.is_not_found() => Error::MissingPathIndex {
                path: file.to_native(),
            },
            pack_fs::Error::ConfigParse { path, message, .. } => Error::InvalidPathIndex {
                path,
                message: message.trim_end().to_string(),
            },
            other => Error::Fs(other),
        })?;
        Self::from_index(bundle_path, index)
    }

    fn from_index(bundle_path: &NormalizedPath, index: IndexFile) -> Result<Self> {
        let message = match (&index.paths.app_packages_path, &index.paths.support_path) {
            (Some(_), Some(_)) | (None, None) => None,
            (Some(_), None) => Some("`app_packages_path` is set but `support_path` is missing"),
            (None, Some(_)) => Some("`support_path` is set but `app_packages_path` is missing"),
        };
        if let Some(message) = message {
            return Err(Error::InvalidPathIndex {
                path: bundle_path.join(PATH_INDEX_FILE).to_native(),
                message: message.to_string(),
            });
        }

        Ok(Self {
            bundle_path: bundle_path.clone(),
            paths: index.paths,
        })
    }

    pub fn bundle_path(&self) -> &NormalizedPath {
        &self.bundle_path
    }

    /// Where the app's own code is installed.
    pub fn app_path(&self) -> NormalizedPath {
        self.bundle_path.join(&self.paths.app_path)
    }

    /// Where third-party dependencies are installed, if the bundle has one.
    pub fn app_packages_path(&self) -> Option<NormalizedPath> {
        self.paths
            .app_packages_path
            .as_deref()
            .map(|p| self.bundle_path.join(p))
    }

    pub fn support_path(&self) -> Option<NormalizedPath> {
        self.paths
            .support_path
            .as_deref()
            .map(|p| self.bundle_path.join(p))
    }

    /// Revision of the support package the template expects.
    pub fn support_revision(&self) -> Option<String> {
        self.paths.support_revision.as_ref().map(|rev| match rev {
            Revision::Number(n) => n.to_string(),
            Revision::Text(s) => s.clone(),
        })
    }

    /// Glob patterns, relative to the bundle, removed when the app is built.
    pub fn cleanup_paths(&self) -> &[String] {
        &self.paths.cleanup_paths
    }

    pub fn icon_targets(&self) -> ImageTargets {
        self.image_targets(self.paths.icon.as_ref())
    }

    pub fn splash_image_targets(&self) -> ImageTargets {
        self.image_targets(self.paths.splash.as_ref())
    }

    /// Icon targets for each declared document type.
    pub fn document_type_icon_targets(&self) -> BTreeMap<String, ImageTargets> {
        self.paths
            .document_type_icon
            .iter()
            .map(|(name, spec)| (name.clone(), self.image_targets(Some(spec))))
            .collect()
    }

    /// Any other role recorded in the index.
    pub fn get(&self, role: &str) -> Option<&toml::Value> {
        self.paths.extra.get(role)
    }

    fn image_targets(&self, spec: Option<&ImageSpec>) -> ImageTargets {
        match spec {
            None => ImageTargets::new(),
            Some(ImageSpec::Single(path)) => {
                ImageTargets::from([(None, self.bundle_path.join(path))])
            }
            Some(ImageSpec::Sized(sizes)) => sizes
                .iter()
                .map(|(size, path)| (Some(size.clone()), self.bundle_path.join(path)))
                .collect(),
        }
    }
}

/// Memoized path indexes for the bundles of one build target.
///
/// The first [`get`](Self::get) for an app reads its index; every later call
/// returns the same value without touching the filesystem, even if the file
/// has since been changed or deleted. There is no invalidation.
#[derive(Debug)]
pub struct PathIndexCache {
    layout: BundleLayout,
    platform: String,
    format: String,
    entries: RefCell<HashMap<String, Rc<PathIndex>>>,
}

impl PathIndexCache {
    pub fn new(layout: BundleLayout, platform: &str, format: &str) -> Self {
        Self {
            layout,
            platform: platform.to_string(),
            format: format.to_string(),
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// The path index of `app`, read on first use.
    pub fn get(&self, app: &str) -> Result<Rc<PathIndex>> {
        if let Some(index) = self.entries.borrow().get(app) {
            tracing::debug!(app, "Path index cache hit");
            return Ok(Rc::clone(index));
        }

        let bundle_path = self.layout.bundle_path(app, &self.platform, &self.format);
        tracing::debug!(app, bundle = %bundle_path, "Path index cache miss; reading index");
        let index = Rc::new(PathIndex::load(&bundle_path)?);
        self.entries
            .borrow_mut()
            .insert(app.to_string(), Rc::clone(&index));
        Ok(index)
    }

    pub fn is_cached(&self, app: &str) -> bool {
        self.entries.borrow().contains_key(app)
    }

    pub fn layout(&self) -> &BundleLayout {
        &self.layout
    }
}

//! Registry of recognized target platforms and their output formats
//!
//! Whether a key inside an app table names a platform sub-table is decided by
//! lookup in this registry, never by the shape of the TOML value. The same
//! holds for output-format keys inside a platform table.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PlatformEntry {
    formats: Vec<String>,
    default_format: String,
    content_types: bool,
}

/// Known platforms, keyed by identifier (`macOS`, `linux`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformRegistry {
    platforms: BTreeMap<String, PlatformEntry>,
}

impl PlatformRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every platform the packager ships support for.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("android", &["gradle"], "gradle");
        registry.register("iOS", &["Xcode"], "Xcode");
        registry.register("linux", &["appimage", "flatpak", "system"], "system");
        registry.register("macOS", &["app", "Xcode"], "app");
        registry.register("web", &["static"], "static");
        registry.register("windows", &["app", "VisualStudio"], "app");
        registry.set_content_types("iOS", true);
        registry.set_content_types("macOS", true);
        registry
    }

    /// Register (or replace) a platform and its output formats.
    pub fn register(&mut self, platform: &str, formats: &[&str], default_format: &str) {
        let mut formats: Vec<String> = formats.iter().map(|f| (*f).to_string()).collect();
        formats.sort();
        self.platforms.insert(
            platform.to_string(),
            PlatformEntry {
                formats,
                default_format: default_format.to_string(),
                content_types: false,
            },
        );
    }

    /// Mark whether a platform exposes a content-type (UTI) system.
    pub fn set_content_types(&mut self, platform: &str, enabled: bool) {
        if let Some(entry) = self.platforms.get_mut(platform) {
            entry.content_types = enabled;
        }
    }

    /// Platform identifiers, in sorted order.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.platforms.keys().map(String::as_str)
    }

    pub fn is_platform(&self, name: &str) -> bool {
        self.platforms.contains_key(name)
    }

    /// Output formats of a platform, in sorted order. Empty for unknown platforms.
    pub fn formats(&self, platform: &str) -> &[String] {
        self.platforms
            .get(platform)
            .map(|entry| entry.formats.as_slice())
            .unwrap_or_default()
    }

    pub fn is_format(&self, platform: &str, name: &str) -> bool {
        self.formats(platform).iter().any(|f| f == name)
    }

    pub fn default_format(&self, platform: &str) -> Option<&str> {
        self.platforms
            .get(platform)
            .map(|entry| entry.default_format.as_str())
    }

    /// Whether document types on this platform derive content-type metadata.
    pub fn has_content_types(&self, platform: &str) -> bool {
        self.platforms
            .get(platform)
            .is_some_and(|entry| entry.content_types)
    }

    /// The platform the current process is running on.
    pub fn host_platform() -> &'static str {
        if cfg!(target_os = "macos") {
            "macOS"
        } else if cfg!(target_os = "windows") {
            "windows"
        } else {
            "linux"
        }
    }
}

//! Format-agnostic configuration loading

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and deserializes the content
/// into the requested type.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        let extension = path.extension().unwrap_or("");
        Self::parse(path, extension, &content)
    }

    /// Parse already-read content as if it came from `path`.
    pub fn parse<T: DeserializeOwned>(
        path: &NormalizedPath,
        extension: &str,
        content: &str,
    ) -> Result<T> {
        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            "json" => serde_json::from_str(content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }
}

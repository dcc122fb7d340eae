//! Text reads with path-carrying errors

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    tracing::trace!(path = %path, "Reading file");
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content, returning `None` if the file does not exist.
pub fn read_text_if_exists(path: &NormalizedPath) -> Result<Option<String>> {
    match read_text(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

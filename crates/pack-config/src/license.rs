//! License specifications and PEP 639 `license-files` resolution

use std::path::Path;

use pack_fs::NormalizedPath;
use serde::Serialize;

use crate::value::{ConfigMap, ConfigValue};
use crate::{Error, Result};

/// How an app declares its license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseSpec {
    /// License text or an SPDX expression.
    Text(String),
    /// Path to a license file, relative to the project directory.
    File(String),
}

impl LicenseSpec {
    /// Interpret a `license` value: a plain string, or a `{file}`/`{text}` table.
    pub fn from_value(value: &ConfigValue) -> Result<Self> {
        match value {
            ConfigValue::String(text) => Ok(Self::Text(text.clone())),
            ConfigValue::Table(table) => {
                if let Some(file) = crate::value::get_str(table, "file")? {
                    Ok(Self::File(file.to_string()))
                } else if let Some(text) = crate::value::get_str(table, "text")? {
                    Ok(Self::Text(text.to_string()))
                } else {
                    Err(Error::MissingField {
                        field: "license.file".to_string(),
                    })
                }
            }
            other => Err(Error::invalid_type(
                "license",
                "a string or a table",
                other.type_name(),
            )),
        }
    }

    /// The `{file = ...}` table form used in resolved configurations.
    pub fn file_value(path: &str) -> ConfigValue {
        let mut table = ConfigMap::new();
        table.insert("file".to_string(), ConfigValue::from(path));
        ConfigValue::Table(table)
    }
}

/// Resolve PEP 639 `license-files` patterns against `project_dir`.
///
/// Patterns are tried in declared order. The first pattern matching at least
/// one file decides the result; when it matches several, the
/// lexicographically first path is chosen and a warning is logged. Patterns
/// that match nothing are skipped. The returned path is relative to
/// `project_dir` and uses forward slashes.
pub fn resolve_license_files(patterns: &[String], project_dir: &Path) -> Result<String> {
    // An empty directory is the current one, not the filesystem root.
    let base = if project_dir.as_os_str().is_empty() {
        None
    } else {
        Some(glob::Pattern::escape(&NormalizedPath::new(project_dir).to_string()))
    };

    for pattern in patterns {
        let full_pattern = match &base {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), pattern),
            None => pattern.clone(),
        };
        let entries = glob::glob(&full_pattern).map_err(|e| Error::InvalidLicenseGlob {
            pattern: pattern.clone(),
            message: e.msg.to_string(),
        })?;

        let mut matches: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .filter(|path| path.is_file())
            .map(|path| {
                let relative = path.strip_prefix(project_dir).unwrap_or(&path);
                NormalizedPath::new(relative).to_string()
            })
            .collect();
        matches.sort();

        tracing::debug!(pattern = %pattern, count = matches.len(), "Evaluated license-files pattern");

        match matches.len() {
            0 => continue,
            1 => return Ok(matches.remove(0)),
            _ => {
                let chosen = matches.remove(0);
                tracing::warn!(
                    pattern = %pattern,
                    chosen = %chosen,
                    others = ?matches,
                    "license-files pattern matched multiple files; using the first"
                );
                return Ok(chosen);
            }
        }
    }

    Err(Error::NoLicenseFiles {
        patterns: patterns
            .iter()
            .map(|p| format!("{p:?}"))
            .collect::<Vec<_>>()
            .join(", "),
        dir: project_dir.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn license_spec_forms() {
        assert_eq!(
            LicenseSpec::from_value(&ConfigValue::from("MIT")).unwrap(),
            LicenseSpec::Text("MIT".to_string())
        );
        assert_eq!(
            LicenseSpec::from_value(&LicenseSpec::file_value("LICENSE")).unwrap(),
            LicenseSpec::File("LICENSE".to_string())
        );
        assert!(LicenseSpec::from_value(&ConfigValue::Integer(1)).is_err());
    }

    #[test]
    fn empty_project_dir_is_the_current_directory() {
        // Test binaries run from the package root.
        let chosen = resolve_license_files(&patterns(&["Cargo.toml"]), Path::new("")).unwrap();
        assert_eq!(chosen, "Cargo.toml");
    }

    #[test]
    fn nested_matches_are_relative_with_forward_slashes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/LICENSE.txt"), "text").unwrap();

        let file = resolve_license_files(&patterns(&["docs/LICENSE*"]), temp.path()).unwrap();
        assert_eq!(file, "docs/LICENSE.txt");
    }

    #[test]
    fn directories_do_not_count_as_matches() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("LICENSES")).unwrap();
        fs::write(temp.path().join("COPYING"), "text").unwrap();

        let file =
            resolve_license_files(&patterns(&["LICENSE*", "COPYING"]), temp.path()).unwrap();
        assert_eq!(file, "COPYING");
    }

    #[test]
    fn malformed_pattern_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = resolve_license_files(&patterns(&["LICENSE[", "COPYING"]), temp.path())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLicenseGlob { pattern, .. } if pattern == "LICENSE["));
    }
}

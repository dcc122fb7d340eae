//! Merging of PEP 621 `[project]` metadata into an app configuration
//!
//! Values already present in the tool configuration always win. The one
//! exception is dependencies: PEP 621 `dependencies` and the `test` group of
//! `optional-dependencies` are prepended to `requires` and `test_requires`.

use std::path::Path;

use crate::license::{LicenseSpec, resolve_license_files};
use crate::value::{ConfigMap, ConfigValue, get_string_list, get_table};
use crate::{Error, Result};

/// PEP 621 metadata ready to be merged into any number of apps.
///
/// `license-files` patterns are evaluated once, when the metadata is built,
/// so every app receives the same license without touching the filesystem
/// again.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectMetadata<'a> {
    project: &'a ConfigMap,
    license: Option<ConfigValue>,
    license_from_files: bool,
}

impl<'a> ProjectMetadata<'a> {
    /// Prepare the `[project]` table, resolving `license-files` against
    /// `project_dir`.
    pub fn new(project: &'a ConfigMap, project_dir: &Path) -> Result<Self> {
        let license = project.get("license");
        let license_files = get_string_list(project, "license-files")?;

        if license.is_some_and(ConfigValue::is_table) && license_files.is_some() {
            return Err(Error::LicenseConflict);
        }

        if let Some(patterns) = license_files {
            let file = resolve_license_files(&patterns, project_dir)?;
            return Ok(Self {
                project,
                license: Some(LicenseSpec::file_value(&file)),
                license_from_files: true,
            });
        }

        let license = match license {
            // The table is copied whole; a table with neither key is ignored.
            Some(ConfigValue::Table(table))
                if table.contains_key("text") || table.contains_key("file") =>
            {
                license.cloned()
            }
            Some(ConfigValue::String(_)) => license.cloned(),
            _ => None,
        };

        Ok(Self {
            project,
            license,
            license_from_files: false,
        })
    }

    /// Fold the metadata into one app's configuration.
    pub fn merge_into(&self, config: &mut ConfigMap) -> Result<()> {
        let project = self.project;
        maybe_update(config, "description", project.get("description"));
        maybe_update(config, "version", project.get("version"));
        maybe_update(config, "requires_python", project.get("requires-python"));
        maybe_update(
            config,
            "url",
            get_table(project, "urls")?.and_then(|urls| urls.get("Homepage")),
        );

        if self.license_from_files && config.contains_key("license") {
            tracing::debug!("Keeping tool license over license-files match");
        }
        maybe_update(config, "license", self.license.as_ref());

        merge_authors(config, project)?;

        if let Some(dependencies) = get_string_list(project, "dependencies")? {
            prepend_requirements(config, "requires", dependencies)?;
        }

        if let Some(optional) = get_table(project, "optional-dependencies")? {
            if let Some(test_dependencies) = get_string_list(optional, "test")? {
                prepend_requirements(config, "test_requires", test_dependencies)?;
            }
        }

        Ok(())
    }
}

/// Merge the PEP 621 table `project` into `config`.
///
/// `project_dir` is the directory `license-files` patterns are evaluated
/// against.
pub fn merge_pep621_config(
    config: &mut ConfigMap,
    project: &ConfigMap,
    project_dir: &Path,
) -> Result<()> {
    ProjectMetadata::new(project, project_dir)?.merge_into(config)
}

fn maybe_update(config: &mut ConfigMap, field: &str, value: Option<&ConfigValue>) {
    if config.contains_key(field) {
        return;
    }
    if let Some(value) = value {
        config.insert(field.to_string(), value.clone());
    }
}

fn merge_authors(config: &mut ConfigMap, project: &ConfigMap) -> Result<()> {
    let Some(authors) = project.get("authors") else {
        return Ok(());
    };
    let authors = authors.as_array().ok_or_else(|| {
        Error::invalid_type("authors", "a list of tables", authors.type_name())
    })?;
    let Some(first) = authors.first() else {
        return Ok(());
    };
    let first = first.as_table().ok_or_else(|| {
        Error::invalid_type("authors", "a list of tables", first.type_name())
    })?;

    maybe_update(config, "author", first.get("name"));
    maybe_update(config, "author_email", first.get("email"));
    Ok(())
}

fn prepend_requirements(
    config: &mut ConfigMap,
    field: &str,
    mut requirements: Vec<String>,
) -> Result<()> {
    if let Some(existing) = get_string_list(config, field)? {
        requirements.extend(existing);
    }
    config.insert(field.to_string(), ConfigValue::string_list(requirements));
    Ok(())
}

//! Typed view of a resolved app configuration

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::license::LicenseSpec;
use crate::naming::{is_pep440_canonical_version, is_valid_app_name, is_valid_bundle_identifier};
use crate::resolver::ResolvedAppConfig;
use crate::value::{ConfigMap, ConfigValue, get_str, get_string_list, get_table, require_str};
use crate::{Error, Result};

/// Keys lifted into typed fields; everything else lands in `extra`.
const KNOWN_KEYS: &[&str] = &[
    "name",
    "formal_name",
    "version",
    "bundle",
    "description",
    "long_description",
    "sources",
    "test_sources",
    "requires",
    "test_requires",
    "url",
    "author",
    "author_email",
    "license",
    "requires_python",
    "icon",
    "splash",
    "supported",
    "document_type",
];

/// The configuration of one app, as consumed by build commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub formal_name: String,
    pub version: String,
    pub bundle: String,
    /// First line of the configured description.
    pub description: String,
    pub long_description: Option<String>,
    pub sources: Vec<String>,
    pub test_sources: Vec<String>,
    pub requires: Vec<String>,
    pub test_requires: Vec<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub author_email: Option<String>,
    pub license: Option<LicenseSpec>,
    pub requires_python: Option<String>,
    pub icon: Option<ConfigValue>,
    pub splash: Option<ConfigValue>,
    pub supported: bool,
    /// Document types keyed by identifier. Expected to be validated already.
    pub document_types: BTreeMap<String, ConfigMap>,
    /// Keys with no dedicated field.
    pub extra: ConfigMap,
}

impl AppConfig {
    /// Build and validate the typed view of a resolved configuration.
    pub fn from_resolved(resolved: &ResolvedAppConfig) -> Result<Self> {
        let map = resolved.as_map();

        let name = require_str(map, "name")?.to_string();
        let version = require_str(map, "version")?.to_string();
        let bundle = require_str(map, "bundle")?.to_string();
        let description = require_str(map, "description")?
            .lines()
            .next()
            .unwrap_or("")
            .to_string();
        let sources = get_string_list(map, "sources")?.ok_or_else(|| Error::MissingField {
            field: "sources".to_string(),
        })?;

        let supported = match map.get("supported") {
            None => true,
            Some(value) => value
                .as_bool()
                .ok_or_else(|| Error::invalid_type("supported", "a boolean", value.type_name()))?,
        };

        let document_types = match get_table(map, "document_type")? {
            None => BTreeMap::new(),
            Some(table) => table
                .iter()
                .map(|(key, value)| {
                    value
                        .as_table()
                        .map(|doc| (key.clone(), doc.clone()))
                        .ok_or_else(|| {
                            Error::invalid_type(
                                format!("document_type.{key}"),
                                "a table",
                                value.type_name(),
                            )
                        })
                })
                .collect::<Result<_>>()?,
        };

        let app = Self {
            formal_name: get_str(map, "formal_name")?.unwrap_or(&name).to_string(),
            name,
            version,
            bundle,
            description,
            long_description: get_str(map, "long_description")?.map(str::to_string),
            sources,
            test_sources: get_string_list(map, "test_sources")?.unwrap_or_default(),
            requires: get_string_list(map, "requires")?.unwrap_or_default(),
            test_requires: get_string_list(map, "test_requires")?.unwrap_or_default(),
            url: get_str(map, "url")?.map(str::to_string),
            author: get_str(map, "author")?.map(str::to_string),
            author_email: get_str(map, "author_email")?.map(str::to_string),
            license: map.get("license").map(LicenseSpec::from_value).transpose()?,
            requires_python: get_str(map, "requires_python")?.map(str::to_string),
            icon: map.get("icon").cloned(),
            splash: map.get("splash").cloned(),
            supported,
            document_types,
            extra: map
                .iter()
                .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        };

        app.validate()?;
        Ok(app)
    }

    fn validate(&self) -> Result<()> {
        if !is_valid_app_name(&self.name) {
            return Err(Error::InvalidAppName {
                name: self.name.clone(),
            });
        }

        if !is_valid_bundle_identifier(&self.bundle) {
            return Err(Error::InvalidBundleIdentifier {
                bundle: self.bundle.clone(),
            });
        }

        if !is_pep440_canonical_version(&self.version) {
            return Err(Error::InvalidVersion {
                app: self.name.clone(),
                version: self.version.clone(),
            });
        }

        let source_modules: BTreeSet<&str> = self
            .sources
            .iter()
            .map(|source| source.rsplit('/').next().unwrap_or(source))
            .collect();
        if source_modules.len() != self.sources.len() {
            return Err(Error::DuplicateSources {
                app: self.name.clone(),
            });
        }

        let module_name = self.module_name();
        if !source_modules.contains(module_name.as_str()) {
            return Err(Error::MissingAppModule {
                app: self.name.clone(),
                module: module_name,
            });
        }

        Ok(())
    }

    /// Python module name: the app name with `-` replaced by `_`.
    pub fn module_name(&self) -> String {
        self.name.replace('-', "_")
    }

    /// Bundle name: the app name with `_` replaced by `-`.
    pub fn bundle_name(&self) -> String {
        self.name.replace('_', "-")
    }

    /// `<bundle>.<bundle_name>`
    pub fn bundle_identifier(&self) -> String {
        format!("{}.{}", self.bundle, self.bundle_name())
    }

    /// The bundle with `-` replaced by `_`, usable as a Java/Python namespace.
    pub fn package_name(&self) -> String {
        self.bundle.replace('-', "_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::table_to_map;
    use pretty_assertions::assert_eq;

    fn resolved(content: &str) -> ResolvedAppConfig {
        let map = table_to_map(toml::from_str(content).unwrap());
        ResolvedAppConfig::new("my-app", map)
    }

    const MINIMAL: &str = r#"
version = "1.2.3"
bundle = "com.example"
description = "A demo app\nwith more text"
sources = ["src/my_app"]
"#;

    #[test]
    fn builds_typed_view_with_defaults() {
        let app = AppConfig::from_resolved(&resolved(MINIMAL)).unwrap();

        assert_eq!(app.name, "my-app");
        assert_eq!(app.formal_name, "my-app");
        assert_eq!(app.description, "A demo app");
        assert!(app.supported);
        assert!(app.requires.is_empty());
        assert_eq!(app.module_name(), "my_app");
        assert_eq!(app.bundle_identifier(), "com.example.my-app");
        assert_eq!(app.package_name(), "com.example");
    }

    #[test]
    fn unknown_keys_are_kept_as_extra() {
        let app =
            AppConfig::from_resolved(&resolved(&format!("{MINIMAL}\ncustom = 42\n"))).unwrap();
        assert_eq!(app.extra.get("custom"), Some(&ConfigValue::Integer(42)));
        assert!(!app.extra.contains_key("version"));
    }

    #[test]
    fn missing_required_field() {
        let err = AppConfig::from_resolved(&resolved("version = \"1.0\"")).unwrap_err();
        assert!(matches!(err, Error::MissingField { field } if field == "bundle"));
    }

    #[test]
    fn invalid_version_names_the_app() {
        let content = MINIMAL.replace("1.2.3", "1.2-beta");
        let err = AppConfig::from_resolved(&resolved(&content)).unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { app, .. } if app == "my-app"));
    }

    #[test]
    fn sources_must_include_app_module() {
        let content = MINIMAL.replace("src/my_app", "src/other");
        let err = AppConfig::from_resolved(&resolved(&content)).unwrap_err();
        assert!(matches!(err, Error::MissingAppModule { module, .. } if module == "my_app"));
    }

    #[test]
    fn duplicate_source_packages_are_rejected() {
        let content = MINIMAL.replace(r#"["src/my_app"]"#, r#"["src/my_app", "lib/my_app"]"#);
        let err = AppConfig::from_resolved(&resolved(&content)).unwrap_err();
        assert!(matches!(err, Error::DuplicateSources { .. }));
    }

    #[test]
    fn license_file_table_is_typed() {
        let content = format!("{MINIMAL}\nlicense = {{ file = \"LICENSE\" }}\n");
        let app = AppConfig::from_resolved(&resolved(&content)).unwrap();
        assert_eq!(app.license, Some(LicenseSpec::File("LICENSE".to_string())));
    }
}

//! Layered resolution of per-app configuration
//!
//! An app's effective configuration for one (platform, format) target is
//! built from four scopes, each overlaying the previous one:
//!
//! 1. **Global** - keys directly under `[tool.pack]`
//! 2. **App** - keys directly under `[tool.pack.app.<name>]`
//! 3. **Platform** - keys under `[tool.pack.app.<name>.<platform>]`
//! 4. **Format** - keys under `[tool.pack.app.<name>.<platform>.<format>]`
//!
//! Overlays replace values key by key. Nested tables and lists are never
//! merged; a key in a deeper scope replaces the shallower value wholesale.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::value::{ConfigMap, ConfigValue};
use crate::{Error, PlatformRegistry, Result};

/// Options declared directly under the tool section, excluding `app`.
pub type GlobalOptions = ConfigMap;

/// The fully merged configuration of one app for one target.
///
/// Always contains a `name` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedAppConfig(ConfigMap);

impl ResolvedAppConfig {
    /// Wrap a merged map, defaulting `name` to `app_name` when absent.
    pub fn new(app_name: &str, mut values: ConfigMap) -> Self {
        values
            .entry("name".to_string())
            .or_insert_with(|| ConfigValue::from(app_name));
        Self(values)
    }

    /// The app's `name`; falls back to an empty string if it is not a string.
    pub fn name(&self) -> &str {
        self.0.get("name").and_then(ConfigValue::as_str).unwrap_or("")
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn as_map(&self) -> &ConfigMap {
        &self.0
    }

    pub fn as_map_mut(&mut self) -> &mut ConfigMap {
        &mut self.0
    }

    pub fn into_map(self) -> ConfigMap {
        self.0
    }
}

/// Merges the configuration scopes of every declared app.
#[derive(Debug, Clone)]
pub struct LayerResolver<'a> {
    registry: &'a PlatformRegistry,
}

impl<'a> LayerResolver<'a> {
    pub fn new(registry: &'a PlatformRegistry) -> Self {
        Self { registry }
    }

    /// Resolve every app in `apps` for the requested target.
    ///
    /// `apps` is the content of the `app` table, keyed by app name. Apps
    /// with no scope that applies to the target are left out of the result.
    pub fn resolve(
        &self,
        global: &GlobalOptions,
        apps: &ConfigMap,
        platform: &str,
        output_format: &str,
    ) -> Result<BTreeMap<String, ResolvedAppConfig>> {
        let mut resolved = BTreeMap::new();

        for (app_name, app_value) in apps {
            let app_table = app_value.as_table().ok_or_else(|| {
                Error::invalid_type(format!("app.{app_name}"), "a table", app_value.type_name())
            })?;

            match self.resolve_app(global, app_name, app_table, platform, output_format)? {
                Some(config) => {
                    resolved.insert(app_name.clone(), config);
                }
                None => {
                    tracing::debug!(app = %app_name, platform, "App has no scope for this platform; skipping");
                }
            }
        }

        Ok(resolved)
    }

    fn resolve_app(
        &self,
        global: &GlobalOptions,
        app_name: &str,
        app_table: &ConfigMap,
        platform: &str,
        output_format: &str,
    ) -> Result<Option<ResolvedAppConfig>> {
        // Discover the platform blocks in registry (alphabetical) order.
        let mut platform_block = None;
        let mut declared_platforms = Vec::new();
        for candidate in self.registry.platforms() {
            if let Some(value) = app_table.get(candidate) {
                let table = value.as_table().ok_or_else(|| {
                    Error::invalid_type(
                        format!("app.{app_name}.{candidate}"),
                        "a table",
                        value.type_name(),
                    )
                })?;
                declared_platforms.push(candidate);
                if candidate == platform {
                    platform_block = Some(table);
                }
            }
        }

        let direct: Vec<(&String, &ConfigValue)> = app_table
            .iter()
            .filter(|(key, _)| !self.registry.is_platform(key))
            .collect();

        // An empty app table is an explicit declaration with no options.
        let has_app_scope = !direct.is_empty() || app_table.is_empty();
        if !has_app_scope && platform_block.is_none() {
            return Ok(None);
        }
        tracing::debug!(app = %app_name, ?declared_platforms, "Resolving app");

        // Layer 1 - global options
        let mut config = global.clone();

        // Layer 2 - app options
        overlay(&mut config, direct.into_iter());

        if let Some(platform_table) = platform_block {
            // Layer 3 - platform options, minus format sub-tables
            let mut format_block = None;
            for candidate in self.registry.formats(platform) {
                if let Some(value) = platform_table.get(candidate) {
                    let table = value.as_table().ok_or_else(|| {
                        Error::invalid_type(
                            format!("app.{app_name}.{platform}.{candidate}"),
                            "a table",
                            value.type_name(),
                        )
                    })?;
                    if candidate == output_format {
                        format_block = Some(table);
                    }
                }
            }

            tracing::debug!(app = %app_name, platform, "Applying platform scope");
            overlay(
                &mut config,
                platform_table
                    .iter()
                    .filter(|(key, _)| !self.registry.is_format(platform, key)),
            );

            // Layer 4 - output format options
            if let Some(format_table) = format_block {
                tracing::debug!(app = %app_name, platform, output_format, "Applying format scope");
                overlay(&mut config, format_table.iter());
            }
        }

        Ok(Some(ResolvedAppConfig::new(app_name, config)))
    }
}

fn overlay<'v>(
    config: &mut ConfigMap,
    entries: impl Iterator<Item = (&'v String, &'v ConfigValue)>,
) {
    for (key, value) in entries {
        config.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::table_to_map;
    use pretty_assertions::assert_eq;

    fn map(content: &str) -> ConfigMap {
        table_to_map(toml::from_str(content).unwrap())
    }

    fn resolve(apps: &str, platform: &str, format: &str) -> BTreeMap<String, ResolvedAppConfig> {
        let registry = PlatformRegistry::with_builtins();
        LayerResolver::new(&registry)
            .resolve(&map("value = 1"), &map(apps), platform, format)
            .unwrap()
    }

    #[test]
    fn name_defaults_to_app_key() {
        let apps = resolve("[first]\n[second]\nname = \"custom\"\n", "macOS", "app");
        assert_eq!(apps["first"].name(), "first");
        assert_eq!(apps["second"].name(), "custom");
    }

    #[test]
    fn global_name_is_not_replaced_by_app_key() {
        let registry = PlatformRegistry::with_builtins();
        let apps = LayerResolver::new(&registry)
            .resolve(&map("name = \"shared\""), &map("[first]\n"), "linux", "system")
            .unwrap();
        assert_eq!(apps["first"].name(), "shared");
    }

    #[test]
    fn deeper_scopes_replace_whole_values() {
        let apps = resolve(
            r#"
[my_app]
requires = ["app-dep"]
table = { a = 1, b = 2 }

[my_app.macOS]
requires = ["mac-dep"]
table = { c = 3 }
"#,
            "macOS",
            "app",
        );

        let config = &apps["my_app"];
        assert_eq!(config.get("requires"), Some(&ConfigValue::string_list(["mac-dep"])));
        assert_eq!(config.get("table"), Some(&ConfigValue::Table(map("c = 3"))));
        assert_eq!(config.get("value"), Some(&ConfigValue::Integer(1)));
    }

    #[test]
    fn format_tables_of_other_formats_are_dropped() {
        let apps = resolve(
            r#"
[my_app.macOS]
platform_key = "mac"

[my_app.macOS.Xcode]
format_key = "xcode"

[my_app.macOS.app]
format_key = "app"
"#,
            "macOS",
            "Xcode",
        );

        let config = apps["my_app"].as_map();
        assert_eq!(config["format_key"], ConfigValue::from("xcode"));
        assert_eq!(config["platform_key"], ConfigValue::from("mac"));
        assert!(!config.contains_key("app"));
        assert!(!config.contains_key("Xcode"));
        assert!(!config.contains_key("macOS"));
    }

    #[test]
    fn platform_named_scalar_is_rejected() {
        let registry = PlatformRegistry::with_builtins();
        let err = LayerResolver::new(&registry)
            .resolve(&ConfigMap::new(), &map("[my_app]\nlinux = \"yes\"\n"), "linux", "system")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFieldType { field, .. } if field == "app.my_app.linux"));
    }
}

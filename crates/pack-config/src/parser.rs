//! Structural parsing of `pyproject.toml`
//!
//! Decodes the document, isolates the `[tool.pack]` section and the PEP 621
//! `[project]` table, and hands the tool section to [`LayerResolver`].

use std::collections::BTreeMap;

use crate::resolver::{GlobalOptions, LayerResolver, ResolvedAppConfig};
use crate::value::{ConfigMap, ConfigValue, table_to_map};
use crate::{Error, PlatformRegistry, Result};

/// Name of the tool section read from `pyproject.toml` (`[tool.pack]`).
pub const TOOL_NAME: &str = "pack";

/// The decoded content of a `pyproject.toml` document.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    root: ConfigMap,
}

impl RawDocument {
    /// Decode TOML text. Syntax errors become [`Error::InvalidToml`].
    pub fn parse(text: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(text).map_err(|e| Error::InvalidToml {
            message: e.to_string().trim_end().to_string(),
        })?;
        Ok(Self {
            root: table_to_map(table),
        })
    }

    pub fn root(&self) -> &ConfigMap {
        &self.root
    }

    /// The `[tool.<tool_name>]` table.
    pub fn tool_section(&self, tool_name: &str) -> Result<&ConfigMap> {
        self.root
            .get("tool")
            .and_then(ConfigValue::as_table)
            .and_then(|tool| tool.get(tool_name))
            .and_then(ConfigValue::as_table)
            .ok_or_else(|| Error::NoToolSection {
                tool: tool_name.to_string(),
            })
    }

    /// The PEP 621 `[project]` table, if the document has one.
    pub fn project_section(&self) -> Result<Option<&ConfigMap>> {
        crate::value::get_table(&self.root, "project")
    }

    /// Split the tool section into global options and the `app` table.
    pub fn split_tool_section(&self, tool_name: &str) -> Result<(GlobalOptions, &ConfigMap)> {
        let section = self.tool_section(tool_name)?;

        let apps = match section.get("app") {
            Some(ConfigValue::Table(apps)) if !apps.is_empty() => apps,
            Some(ConfigValue::Table(_)) | None => {
                return Err(Error::NoApps {
                    tool: tool_name.to_string(),
                });
            }
            Some(other) => {
                return Err(Error::invalid_type(
                    format!("tool.{tool_name}.app"),
                    "a table",
                    other.type_name(),
                ));
            }
        };

        let global = section
            .iter()
            .filter(|(key, _)| key.as_str() != "app")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok((global, apps))
    }

    /// Resolve global options and every app for one target.
    pub fn resolve(
        &self,
        registry: &PlatformRegistry,
        platform: &str,
        output_format: &str,
    ) -> Result<(GlobalOptions, BTreeMap<String, ResolvedAppConfig>)> {
        let (global, apps) = self.split_tool_section(TOOL_NAME)?;
        let resolved =
            LayerResolver::new(registry).resolve(&global, apps, platform, output_format)?;
        Ok((global, resolved))
    }
}

/// Parse a `pyproject.toml` document and resolve it for one target.
///
/// Returns the global options and one merged configuration per app.
pub fn parse_config(
    text: &str,
    registry: &PlatformRegistry,
    platform: &str,
    output_format: &str,
) -> Result<(GlobalOptions, BTreeMap<String, ResolvedAppConfig>)> {
    RawDocument::parse(text)?.resolve(registry, platform, output_format)
}

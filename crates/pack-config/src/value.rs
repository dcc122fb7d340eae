//! Tagged configuration values
//!
//! Every layer of a project description is decoded into [`ConfigValue`]s held
//! in a [`ConfigMap`]. The map is ordered, so anything derived from it
//! (merged app configs, JSON output) comes out the same regardless of how the
//! source document ordered its keys.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Error, Result};

/// An ordered mapping of configuration keys to values.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// A single configuration value decoded from TOML.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// TOML datetimes are kept in their textual form.
    Datetime(String),
    Array(Vec<ConfigValue>),
    Table(ConfigMap),
}

impl ConfigValue {
    /// Short name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "a string",
            Self::Integer(_) => "an integer",
            Self::Float(_) => "a float",
            Self::Boolean(_) => "a boolean",
            Self::Datetime(_) => "a datetime",
            Self::Array(_) => "a list",
            Self::Table(_) => "a table",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&ConfigMap> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }

    /// Build a list value from strings.
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Array(items.into_iter().map(|s| Self::String(s.into())).collect())
    }

    /// Convert to a JSON value for display and machine-readable output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) | Self::Datetime(s) => serde_json::Value::String(s.clone()),
            Self::Integer(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::Array(a) => serde_json::Value::Array(a.iter().map(Self::to_json).collect()),
            Self::Table(t) => map_to_json(t),
        }
    }
}

impl From<toml::Value> for ConfigValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::String(s),
            toml::Value::Integer(i) => Self::Integer(i),
            toml::Value::Float(f) => Self::Float(f),
            toml::Value::Boolean(b) => Self::Boolean(b),
            toml::Value::Datetime(d) => Self::Datetime(d.to_string()),
            toml::Value::Array(a) => Self::Array(a.into_iter().map(Self::from).collect()),
            toml::Value::Table(t) => Self::Table(table_to_map(t)),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

/// Convert a decoded TOML table into an ordered config map.
pub fn table_to_map(table: toml::Table) -> ConfigMap {
    table
        .into_iter()
        .map(|(key, value)| (key, ConfigValue::from(value)))
        .collect()
}

/// Convert a config map to a JSON object.
pub fn map_to_json(map: &ConfigMap) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect(),
    )
}

/// Look up an optional string field.
///
/// Absent is `Ok(None)`; present with any other type is an error.
pub fn get_str<'a>(map: &'a ConfigMap, key: &str) -> Result<Option<&'a str>> {
    match map.get(key) {
        None => Ok(None),
        Some(ConfigValue::String(s)) => Ok(Some(s)),
        Some(other) => Err(Error::invalid_type(key, "a string", other.type_name())),
    }
}

/// Look up a required string field.
pub fn require_str<'a>(map: &'a ConfigMap, key: &str) -> Result<&'a str> {
    get_str(map, key)?.ok_or_else(|| Error::MissingField {
        field: key.to_string(),
    })
}

/// Look up an optional table field.
pub fn get_table<'a>(map: &'a ConfigMap, key: &str) -> Result<Option<&'a ConfigMap>> {
    match map.get(key) {
        None => Ok(None),
        Some(ConfigValue::Table(t)) => Ok(Some(t)),
        Some(other) => Err(Error::invalid_type(key, "a table", other.type_name())),
    }
}

/// Look up an optional list of strings.
pub fn get_string_list(map: &ConfigMap, key: &str) -> Result<Option<Vec<String>>> {
    let Some(value) = map.get(key) else {
        return Ok(None);
    };
    let items = value
        .as_array()
        .ok_or_else(|| Error::invalid_type(key, "a list of strings", value.type_name()))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::invalid_type(key, "a list of strings", item.type_name()))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

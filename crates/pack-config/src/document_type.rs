//! Validation of document type associations
//!
//! A document type lets an app register itself as a handler for files with a
//! given extension:
//!
//! ```toml
//! [tool.pack.app.myapp.document_type.mydoc]
//! icon = "icons/mydoc"
//! description = "My document"
//! url = "https://example.com/mydoc"
//! extension = "mydoc"
//! mime_type = "application/x-mydoc"
//! ```
//!
//! On platforms with a content-type system, validation also derives the
//! registration metadata into a sub-table named after the platform.

use std::sync::LazyLock;

use regex::Regex;

use crate::uti::{UtiMatch, uti_for_mime_type};
use crate::value::{ConfigMap, ConfigValue};
use crate::{Error, PlatformRegistry, Result};

/// Absolute URL with a scheme and a host.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#@]+(?:[/?#]\S*)?$").unwrap()
});

const CONTENT_TYPES_KEY: &str = "LSItemContentTypes";
const CONFORMS_TO_KEY: &str = "UTTypeConformsTo";
const HANDLER_RANK_KEY: &str = "LSHandlerRank";
const CORE_TYPE_KEY: &str = "is_core_type";

/// Validates document type entries for one target platform.
#[derive(Debug, Clone)]
pub struct DocumentTypeValidator<'a> {
    registry: &'a PlatformRegistry,
    platform: &'a str,
}

impl<'a> DocumentTypeValidator<'a> {
    pub fn new(registry: &'a PlatformRegistry, platform: &'a str) -> Self {
        Self { registry, platform }
    }

    /// Validate one document type, normalizing `config` in place.
    pub fn validate(&self, document_type: &str, config: &mut ConfigMap) -> Result<()> {
        require_string(document_type, config, "icon")?;
        require_string(document_type, config, "description")?;

        let url = config.get("url").ok_or_else(|| Error::MissingDocumentTypeField {
            document_type: document_type.to_string(),
            field: "url",
        })?;
        match url.as_str() {
            Some(url) if URL_PATTERN.is_match(url) => {}
            _ => {
                return Err(Error::InvalidDocumentTypeUrl {
                    document_type: document_type.to_string(),
                    url: display_value(url),
                });
            }
        }

        let extension = config
            .get("extension")
            .ok_or_else(|| Error::MissingDocumentTypeField {
                document_type: document_type.to_string(),
                field: "extension",
            })?;
        match extension.as_str() {
            Some(ext) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {}
            _ => {
                return Err(Error::InvalidDocumentTypeExtension {
                    document_type: document_type.to_string(),
                    extension: display_value(extension),
                });
            }
        }

        let mime_type = match config.get("mime_type") {
            None => None,
            Some(ConfigValue::String(mime)) => Some(mime.clone()),
            Some(_) => {
                return Err(Error::InvalidDocumentTypeField {
                    document_type: document_type.to_string(),
                    field: "mime_type",
                });
            }
        };

        if self.registry.has_content_types(self.platform) {
            self.derive_content_type(document_type, config, mime_type.as_deref())?;
        }

        Ok(())
    }

    /// Validate every entry of an app's `document_type` table.
    pub fn validate_app(&self, app_config: &mut ConfigMap) -> Result<()> {
        let Some(value) = app_config.get_mut("document_type") else {
            return Ok(());
        };
        let found = value.type_name();
        let document_types = value
            .as_table_mut()
            .ok_or_else(|| Error::invalid_type("document_type", "a table", found))?;

        for (document_type, entry) in document_types.iter_mut() {
            let found = entry.type_name();
            let entry = entry.as_table_mut().ok_or_else(|| {
                Error::invalid_type(format!("document_type.{document_type}"), "a table", found)
            })?;
            self.validate(document_type, entry)?;
        }

        Ok(())
    }

    fn derive_content_type(
        &self,
        document_type: &str,
        config: &mut ConfigMap,
        mime_type: Option<&str>,
    ) -> Result<()> {
        let platform_config = config
            .entry(self.platform.to_string())
            .or_insert_with(|| ConfigValue::Table(ConfigMap::new()));
        let found = platform_config.type_name();
        let platform_config = platform_config.as_table_mut().ok_or_else(|| {
            Error::invalid_type(
                format!("document_type.{document_type}.{}", self.platform),
                "a table",
                found,
            )
        })?;

        let declared = normalize_content_types(document_type, platform_config)?;
        let content_type = match declared {
            Some(uti) => Some(uti),
            None => match mime_type.map(uti_for_mime_type) {
                Some(UtiMatch::Unique(uti)) => Some(uti.to_string()),
                Some(UtiMatch::Ambiguous) => {
                    tracing::debug!(document_type, ?mime_type, "MIME type maps to several UTIs");
                    None
                }
                Some(UtiMatch::Unknown) | None => None,
            },
        };

        if let Some(uti) = content_type {
            tracing::debug!(document_type, uti = %uti, "Document type is a core type");
            platform_config.insert(
                CONTENT_TYPES_KEY.to_string(),
                ConfigValue::string_list([uti]),
            );
            platform_config.insert(CORE_TYPE_KEY.to_string(), ConfigValue::Boolean(true));
            platform_config.insert(HANDLER_RANK_KEY.to_string(), ConfigValue::from("Alternate"));
        } else {
            tracing::debug!(document_type, "Document type is a custom type");
            platform_config.insert(CORE_TYPE_KEY.to_string(), ConfigValue::Boolean(false));
            platform_config
                .entry(HANDLER_RANK_KEY.to_string())
                .or_insert_with(|| ConfigValue::from("Owner"));
            platform_config
                .entry(CONFORMS_TO_KEY.to_string())
                .or_insert_with(|| ConfigValue::string_list(["public.data", "public.content"]));
        }

        Ok(())
    }
}

/// Validate one document type for `platform` using the builtin registry.
pub fn validate_document_type_config(
    document_type: &str,
    config: &mut ConfigMap,
    platform: &str,
) -> Result<()> {
    let registry = PlatformRegistry::with_builtins();
    DocumentTypeValidator::new(&registry, platform).validate(document_type, config)
}

fn require_string(document_type: &str, config: &ConfigMap, field: &'static str) -> Result<()> {
    match config.get(field) {
        None => Err(Error::MissingDocumentTypeField {
            document_type: document_type.to_string(),
            field,
        }),
        Some(ConfigValue::String(_)) => Ok(()),
        Some(_) => Err(Error::InvalidDocumentTypeField {
            document_type: document_type.to_string(),
            field,
        }),
    }
}

/// Reduce a caller-supplied `LSItemContentTypes` to at most one UTI.
///
/// A string or one-element list is accepted; longer lists are an error.
fn normalize_content_types(document_type: &str, platform_config: &ConfigMap) -> Result<Option<String>> {
    let Some(value) = platform_config.get(CONTENT_TYPES_KEY) else {
        return Ok(None);
    };

    let single = match value {
        ConfigValue::String(uti) => Some(uti),
        ConfigValue::Array(items) if items.len() > 1 => {
            return Err(Error::MultipleContentTypes {
                document_type: document_type.to_string(),
            });
        }
        ConfigValue::Array(items) => match items.first() {
            None => return Ok(None),
            Some(ConfigValue::String(uti)) => Some(uti),
            Some(other) => {
                return Err(Error::invalid_type(
                    CONTENT_TYPES_KEY,
                    "a string or a list of strings",
                    other.type_name(),
                ));
            }
        },
        other => {
            return Err(Error::invalid_type(
                CONTENT_TYPES_KEY,
                "a string or a list of strings",
                other.type_name(),
            ));
        }
    };

    Ok(single.cloned())
}

fn display_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => format!("{s:?}"),
        other => other.to_json().to_string(),
    }
}

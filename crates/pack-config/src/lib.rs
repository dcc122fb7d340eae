//! Configuration resolution engine for Pack
//!
//! Turns a `pyproject.toml` project description into one concrete
//! configuration per app for a single (platform, output format) target:
//!
//! - **Parsing**: [`RawDocument`] isolates the `[tool.pack]` section and the
//!   PEP 621 `[project]` table
//! - **Layering**: [`LayerResolver`] merges global, app, platform and format
//!   scopes
//! - **Metadata**: [`merge_pep621_config`] folds in PEP 621/639 project
//!   metadata, including `license-files` resolution
//! - **Document types**: [`DocumentTypeValidator`] checks file associations
//!   and derives content-type metadata
//!
//! # Example
//!
//! ```
//! use pack_config::{PlatformRegistry, parse_config};
//!
//! let registry = PlatformRegistry::with_builtins();
//! let (_, apps) = parse_config(
//!     r#"
//! [tool.pack]
//! version = "1.0"
//!
//! [tool.pack.app.demo.macOS]
//! universal_build = true
//! "#,
//!     &registry,
//!     "macOS",
//!     "app",
//! )
//! .unwrap();
//!
//! assert_eq!(apps["demo"].name(), "demo");
//! ```

pub mod app;
pub mod document_type;
pub mod error;
pub mod license;
pub mod naming;
pub mod parser;
pub mod pep621;
pub mod platform;
pub mod resolver;
pub mod uti;
pub mod value;

pub use app::AppConfig;
pub use document_type::{DocumentTypeValidator, validate_document_type_config};
pub use error::{Error, Result};
pub use license::{LicenseSpec, resolve_license_files};
pub use parser::{RawDocument, TOOL_NAME, parse_config};
pub use pep621::{ProjectMetadata, merge_pep621_config};
pub use platform::PlatformRegistry;
pub use resolver::{GlobalOptions, LayerResolver, ResolvedAppConfig};
pub use uti::{UtiMatch, uti_for_mime_type};
pub use value::{ConfigMap, ConfigValue};

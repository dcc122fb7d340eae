//! Error types for pack-config
//!
//! Every variant is a user-facing configuration error. The messages are
//! rendered verbatim by the CLI, so each one names the offending field and
//! says what a valid value looks like.

/// Result type for pack-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing, resolving and validating configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid pyproject.toml: {message}")]
    InvalidToml { message: String },

    #[error("No tool.{tool} section in pyproject.toml")]
    NoToolSection { tool: String },

    #[error(
        "No apps defined in pyproject.toml.\n\n\
         Declare at least one app with a [tool.{tool}.app.<name>] section."
    )]
    NoApps { tool: String },

    #[error("`{field}` must be {expected}, found {found}")]
    InvalidFieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{field}` is required but was not provided")]
    MissingField { field: String },

    #[error(
        "Your pyproject.toml specifies both `license` as a table and `license-files`.\n\n\
         Use `license-files` on its own, or move to an SPDX `license` expression."
    )]
    LicenseConflict,

    #[error(
        "None of the `license-files` patterns ({patterns}) matched a file in {dir}.\n\n\
         Add a license file to the project, or correct the patterns."
    )]
    NoLicenseFiles { patterns: String, dir: String },

    #[error("Invalid `license-files` pattern {pattern:?}: {message}")]
    InvalidLicenseGlob { pattern: String, message: String },

    #[error("Document type {document_type:?} does not define the required `{field}` field.")]
    MissingDocumentTypeField {
        document_type: String,
        field: &'static str,
    },

    #[error("The `{field}` associated with document type {document_type:?} is not a string.")]
    InvalidDocumentTypeField {
        document_type: String,
        field: &'static str,
    },

    #[error("The URL associated with document type {document_type:?} is invalid: {url}")]
    InvalidDocumentTypeUrl { document_type: String, url: String },

    #[error(
        "The extension provided for document type {document_type:?} is not alphanumeric: {extension}"
    )]
    InvalidDocumentTypeExtension {
        document_type: String,
        extension: String,
    },

    #[error(
        "Document type {document_type:?} has multiple content types.\n\n\
         Each document type may only declare a single entry in `LSItemContentTypes`."
    )]
    MultipleContentTypes { document_type: String },

    #[error(
        "{name:?} is not a valid app name.\n\n\
         App names must not be reserved keywords such as 'and', 'for' and 'while'.\n\
         They must also be PEP508 compliant (i.e., they can only include letters,\n\
         numbers, '-' and '_'; must start with a letter; and cannot end with '-' or '_')."
    )]
    InvalidAppName { name: String },

    #[error(
        "{bundle:?} is not a valid bundle identifier.\n\n\
         The bundle should be a reversed domain name. It must contain at least 2\n\
         dot-separated sections; each section may only include letters, numbers,\n\
         and hyphens; and each section may not contain any reserved words (like\n\
         'switch', or 'while')."
    )]
    InvalidBundleIdentifier { bundle: String },

    #[error(
        "Version number for {app:?} ({version}) is not valid.\n\n\
         Version numbers must be PEP440 compliant; \
         see https://peps.python.org/pep-0440/ for details."
    )]
    InvalidVersion { app: String, version: String },

    #[error("The `sources` list for {app:?} contains duplicated package names.")]
    DuplicateSources { app: String },

    #[error("The `sources` list for {app:?} does not include a package named {module:?}.")]
    MissingAppModule { app: String, module: String },
}

impl Error {
    pub(crate) fn invalid_type(
        field: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::InvalidFieldType {
            field: field.into(),
            expected,
            found,
        }
    }
}

//! Validators for app names, bundle identifiers and version numbers

use std::sync::LazyLock;

use regex::Regex;

/// PEP 508 project name.
static PEP508_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Z0-9]|[A-Z0-9][A-Z0-9._-]*[A-Z0-9])$").unwrap()
});

/// Reversed domain name with at least two sections.
static BUNDLE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)+$").unwrap());

/// Canonical PEP 440 version.
static PEP440_CANONICAL_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^((?P<epoch>[1-9][0-9]*)!)?",
        r"(?P<release>(0|[1-9][0-9]*)(\.(0|[1-9][0-9]*))*)",
        r"((?P<pre_tag>a|b|rc)(?P<pre_value>0|[1-9][0-9]*))?",
        r"(\.post(?P<post>0|[1-9][0-9]*))?",
        r"(\.dev(?P<dev>0|[1-9][0-9]*))?$",
    ))
    .unwrap()
});

/// Words that cannot be used as app names or bundle segments: Python
/// keywords plus names reserved by the Java and Objective-C toolchains.
const RESERVED_WORDS: &[&str] = &[
    // Python
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "false", "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "none", "nonlocal", "not", "or", "pass", "raise", "return", "true", "try", "while",
    "with", "yield",
    // Java
    "abstract", "boolean", "byte", "case", "catch", "char", "const", "default", "do", "double",
    "enum", "extends", "final", "float", "goto", "implements", "instanceof", "int", "interface",
    "long", "native", "new", "null", "package", "private", "protected", "public", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "void", "volatile",
    // Objective-C / C
    "auto", "extern", "id", "register", "signed", "sizeof", "struct", "typedef", "union",
    "unsigned",
];

/// Whether `name` (in any case) is a reserved word.
pub fn is_reserved_keyword(name: &str) -> bool {
    let lower = name.to_lowercase();
    RESERVED_WORDS.contains(&lower.as_str())
}

pub fn is_valid_pep508_name(name: &str) -> bool {
    PEP508_NAME.is_match(name)
}

/// App names must be PEP 508 compliant and not reserved.
pub fn is_valid_app_name(name: &str) -> bool {
    !is_reserved_keyword(name) && is_valid_pep508_name(name)
}

/// Bundle identifiers are reversed domain names without reserved segments.
///
/// `in` and `is` are allowed as segments since they are real country codes.
pub fn is_valid_bundle_identifier(bundle: &str) -> bool {
    BUNDLE_IDENTIFIER.is_match(bundle)
        && bundle
            .split('.')
            .all(|part| !is_reserved_keyword(part) || part == "in" || part == "is")
}

pub fn is_pep440_canonical_version(version: &str) -> bool {
    PEP440_CANONICAL_VERSION.is_match(version)
}

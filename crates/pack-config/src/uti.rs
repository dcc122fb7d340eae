//! Static MIME type to Uniform Type Identifier lookup
//!
//! Apple platforms register document types by UTI. Core system types are
//! mapped here so a document type that declares a well-known MIME type can
//! reuse the system UTI instead of exporting a custom one.

/// UTIs and the MIME types that identify them.
const UTI_MIME_TYPES: &[(&str, &[&str])] = &[
    ("com.adobe.pdf", &["application/pdf"]),
    ("com.apple.m4a-audio", &["audio/mp4", "audio/x-m4a"]),
    ("com.apple.quicktime-movie", &["video/quicktime"]),
    ("com.compuserve.gif", &["image/gif"]),
    ("com.microsoft.bmp", &["image/bmp"]),
    ("com.microsoft.excel.xls", &["application/vnd.ms-excel"]),
    ("com.microsoft.word.doc", &["application/msword"]),
    ("net.daringfireball.markdown", &["text/markdown"]),
    (
        "org.gnu.gnu-zip-archive",
        &["application/gzip", "application/x-gzip"],
    ),
    (
        "org.openxmlformats.spreadsheetml.sheet",
        &["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"],
    ),
    (
        "org.openxmlformats.wordprocessingml.document",
        &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"],
    ),
    ("public.comma-separated-values-text", &["text/csv"]),
    ("public.html", &["text/html"]),
    ("public.jpeg", &["image/jpeg"]),
    ("public.json", &["application/json"]),
    ("public.mp3", &["audio/mpeg"]),
    ("public.mpeg-4", &["video/mp4"]),
    ("public.mpeg-4-audio", &["audio/mp4"]),
    ("public.plain-text", &["text/plain"]),
    ("public.png", &["image/png"]),
    ("public.python-script", &["text/x-python", "text/x-script.python"]),
    ("public.rtf", &["text/rtf", "application/rtf"]),
    ("public.svg-image", &["image/svg+xml"]),
    ("public.tar-archive", &["application/x-tar"]),
    ("public.tiff", &["image/tiff"]),
    (
        "public.vcard",
        &["text/vcard", "text/directory", "text/x-vcard"],
    ),
    ("public.xml", &["application/xml", "text/xml"]),
    ("public.zip-archive", &["application/zip"]),
];

/// Outcome of a MIME type lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtiMatch {
    /// Exactly one UTI declares the MIME type.
    Unique(&'static str),
    /// Several UTIs declare it; none can be picked.
    Ambiguous,
    /// No UTI declares it.
    Unknown,
}

/// Find the UTI for a MIME type. Matching ignores ASCII case.
pub fn uti_for_mime_type(mime_type: &str) -> UtiMatch {
    let mut found = UTI_MIME_TYPES
        .iter()
        .filter(|(_, mimes)| mimes.iter().any(|m| m.eq_ignore_ascii_case(mime_type)))
        .map(|(uti, _)| *uti);

    match (found.next(), found.next()) {
        (Some(uti), None) => UtiMatch::Unique(uti),
        (Some(_), Some(_)) => UtiMatch::Ambiguous,
        _ => UtiMatch::Unknown,
    }
}

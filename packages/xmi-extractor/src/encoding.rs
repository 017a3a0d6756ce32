//! Repair legacy-encoded XMI exports into UTF-8 text a standard XML parser accepts.
//!
//! The exporter always writes bytes in its fixed legacy encoding, while the
//! XML declaration may claim something else. The bytes are decoded under the
//! fixed encoding (never sniffed), the first `encoding="..."` in the text is
//! rewritten to `UTF-8`, and the result is handed on as a Rust `String`,
//! which is the UTF-8 buffer the parser consumes.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use regex::NoExpand;

use crate::config::{CANONICAL_ENCODING, ENCODING_DECLARATION, SOURCE_ENCODING};
use crate::error::{ExtractorError, Result};

/// Read a file and normalize it into parser-ready UTF-8 text.
///
/// # Errors
/// * [`ExtractorError::InputNotFound`] if the file does not exist
/// * [`ExtractorError::Io`] for any other read failure
/// * [`ExtractorError::Decode`] if the bytes are invalid in the legacy encoding
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| ExtractorError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read XMI source");

    normalize(&bytes).ok_or_else(|| ExtractorError::Decode {
        path: path.to_path_buf(),
        encoding: SOURCE_ENCODING.name(),
    })
}

/// Decode legacy bytes and rewrite the XML declaration.
///
/// Returns `None` when the input contains a byte sequence that is invalid in
/// the legacy encoding. Malformed input is rejected rather than replaced.
///
/// # Examples
/// ```
/// use xmi_extractor::encoding::normalize;
///
/// let text = normalize(br#"<?xml version="1.0" encoding="Shift_JIS"?><XMI/>"#).unwrap();
/// assert_eq!(text, r#"<?xml version="1.0" encoding="UTF-8"?><XMI/>"#);
/// ```
#[must_use]
pub fn normalize(bytes: &[u8]) -> Option<String> {
    let decoded = decode_legacy(bytes)?;
    Some(rewrite_encoding_declaration(&decoded).into_owned())
}

/// Decode bytes under the exporter's fixed encoding.
#[must_use]
pub fn decode_legacy(bytes: &[u8]) -> Option<Cow<'_, str>> {
    SOURCE_ENCODING.decode_without_bom_handling_and_without_replacement(bytes)
}

/// Replace the value of the first `encoding=` attribute with `UTF-8`.
///
/// Only the first occurrence is touched; encoding-like strings later in the
/// body are left alone. Text without any declaration is returned unchanged.
#[must_use]
pub fn rewrite_encoding_declaration(text: &str) -> Cow<'_, str> {
    let replacement = format!(r#"encoding="{CANONICAL_ENCODING}""#);
    ENCODING_DECLARATION.replacen(text, 1, NoExpand(&replacement))
}

//! Byte decoding with a fixed Latin-1 fallback.
//!
//! Files frequently arrive declared as UTF-8 but exported as Latin-1. The
//! parser decodes strictly with the declared encoding first and retries once
//! with Windows-1252 (encoding_rs's mapping for the ISO-8859-1 label),
//! logging a warning on fallback.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::warn;

use crate::error::IngestError;

/// Resolve an encoding label (`utf-8`, `iso-8859-1`, `cp1252`, ...).
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, IngestError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| IngestError::UnknownEncoding(label.to_string()))
}

/// Strictly decode `bytes` with `declared`, falling back to Latin-1 once.
pub fn decode_with_fallback(
    path: &Path,
    bytes: &[u8],
    declared: &'static Encoding,
) -> Result<String, IngestError> {
    let bytes = strip_utf8_bom(bytes, declared);

    if let Some(text) = declared.decode_without_bom_handling_and_without_replacement(bytes) {
        return Ok(text.into_owned());
    }

    warn!(
        path = %path.display(),
        declared = declared.name(),
        fallback = WINDOWS_1252.name(),
        "declared encoding failed, retrying with Latin-1 fallback"
    );
    WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| IngestError::Decode {
            path: path.to_path_buf(),
            encoding: declared.name().to_string(),
        })
}

fn strip_utf8_bom<'a>(bytes: &'a [u8], declared: &'static Encoding) -> &'a [u8] {
    if declared == UTF_8 && bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &bytes[3..]
    } else {
        bytes
    }
}

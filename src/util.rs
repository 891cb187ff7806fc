//! Text utilities shared across the extraction pipeline.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<meta charset="...">`)
/// 3. Falls back to Windows-1252 (common on legacy pages)
///
/// # Arguments
///
/// * `bytes` - The raw bytes to decode
/// * `hint_encoding` - Optional encoding name from document metadata
///
/// # Returns
///
/// The decoded string. Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    // Try UTF-8 first (handles BOM automatically)
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    // If UTF-8 failed, try the hint encoding
    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    // Fallback: Windows-1252 (superset of ISO-8859-1)
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the declared charset from an HTML prelude.
///
/// Scans the first 1024 bytes for a `charset=` declaration, covering both
/// `<meta charset="utf-8">` and `<meta http-equiv="Content-Type"
/// content="text/html; charset=utf-8">`.
///
/// # Returns
///
/// The charset name if found, or `None`.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    // Browsers sniff at most the first 1024 bytes for the charset
    let check_len = bytes.len().min(1024);
    let prefix = &bytes[..check_len];

    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let mut rest = &prefix[pos + 8..];

    let quote = match rest.first() {
        Some(&q @ (b'"' | b'\'')) => {
            rest = &rest[1..];
            Some(q)
        }
        _ => None,
    };

    let end = rest
        .iter()
        .position(|&b| match quote {
            Some(q) => b == q,
            None => matches!(b, b'"' | b'\'' | b' ' | b'\t' | b'\n' | b'\r' | b';' | b'>' | b'/'),
        })
        .unwrap_or(rest.len());

    let value = &rest[..end];
    if value.is_empty() {
        return None;
    }
    std::str::from_utf8(value).ok()
}

// ============================================================================
// String Helpers
// ============================================================================

/// Truncate a string to at most `max_chars` characters, on a char boundary.
///
/// Labels, section text, and snippets are capped by character count, not
/// bytes, so multibyte text is never split mid-scalar.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Collapse all whitespace runs (including newlines) to single spaces and
/// trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve an href against a base URL, returning the original string when
/// either side fails to parse. Collection never aborts on a bad URL.
pub fn resolve_url(base_url: &str, href: &str) -> String {
    match url::Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

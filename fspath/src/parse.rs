//! Raw string parsing into kind and segments.
//!
//! Parsing normalizes the alternate separator, classifies the path kind from
//! its prefix when no explicit kind is given, trims the outer separators,
//! and splits the remainder into segments. Escape handling depends on how
//! the input is marked: pre-escaped strings are decoded segment by segment,
//! literal strings are only scanned for restricted characters.

use crate::error::{Error, Result};
use crate::escape;
use crate::kind::PathKind;
use crate::path::{ASCENT_MARKER, UNKNOWN_MARKER};

/// Outcome of parsing a raw path string.
#[derive(Debug)]
pub(crate) struct Parsed {
    pub(crate) kind: PathKind,
    pub(crate) segments: Vec<String>,
    pub(crate) was_escaped: bool,
}

/// Classify a separator-normalized string by its prefix.
///
/// A single leading separator signals a relative path; two signal a
/// network-share root, which is absolute. The ascent and unknown markers
/// only count when followed by a separator.
fn classify(normalized: &str) -> PathKind {
    let bytes = normalized.as_bytes();

    let single_leading_separator = bytes.first() == Some(&b'\\') && bytes.get(1) != Some(&b'\\');

    let ascent_prefix = normalized
        .strip_prefix(ASCENT_MARKER)
        .is_some_and(|rest| rest.starts_with(escape::DIRECTORY_SEPARATOR));

    if single_leading_separator || ascent_prefix {
        PathKind::Relative
    } else if unknown_prefix(normalized).is_some() {
        PathKind::Unknown
    } else {
        PathKind::Absolute
    }
}

/// Strip the unknown-marker prefix, returning the remainder.
///
/// The marker only counts when the string ends there or a separator
/// follows, so a segment that merely starts with the marker characters is
/// left alone.
fn unknown_prefix(normalized: &str) -> Option<&str> {
    normalized
        .strip_prefix(UNKNOWN_MARKER)
        .filter(|rest| rest.is_empty() || rest.starts_with(escape::DIRECTORY_SEPARATOR))
}

/// Parse a raw path string into kind and segments.
///
/// `explicit_kind` skips classification; `pre_escaped` selects between
/// decoding escape tokens and scanning for restricted characters.
pub(crate) fn parse_str(
    input: &str,
    explicit_kind: Option<PathKind>,
    pre_escaped: bool,
) -> Result<Parsed> {
    if input.is_empty() {
        return Err(Error::EmptyPath);
    }

    let normalized = input.replace(escape::ALT_DIRECTORY_SEPARATOR, "\\");

    let kind = explicit_kind.unwrap_or_else(|| classify(&normalized));

    let mut body = normalized.as_str();
    if kind == PathKind::Unknown {
        if let Some(rest) = unknown_prefix(body) {
            body = rest;
        }
    }

    let trimmed = body.trim_matches(escape::DIRECTORY_SEPARATOR);
    if trimmed.is_empty() {
        return Err(Error::EmptyPath);
    }

    let mut segments = Vec::new();
    for (index, raw) in trimmed.split(escape::DIRECTORY_SEPARATOR).enumerate() {
        if raw.is_empty() {
            return Err(Error::InvalidSegment { index });
        }
        segments.push(raw.to_string());
    }

    let mut was_escaped = false;
    if pre_escaped {
        for segment in &mut segments {
            if let Some(decoded) = escape::try_unescape(segment) {
                *segment = decoded;
                was_escaped = true;
            }
        }
        if was_escaped {
            log::debug!("decoded escape tokens while parsing a {kind} path");
        }
    } else {
        was_escaped = segments.iter().any(|s| escape::needs_escaping(s));
    }

    Ok(Parsed {
        kind,
        segments,
        was_escaped,
    })
}

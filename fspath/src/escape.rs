//! Bidirectional escaping of restricted path characters.
//!
//! A path segment may legitimately contain characters that the serialized
//! path form reserves for itself (separators, the volume and list separators)
//! or that file systems refuse outright (control characters, `"`, `<`, `>`,
//! `|`). So that such segments survive a round trip through a single string,
//! each restricted character maps to a fixed 3-character token: the escape
//! character followed by two symbol characters.
//!
//! The token table is a wire format. Escaped strings may be persisted and
//! exchanged, so the mapping below must never change.
//!
//! # Examples
//!
//! ```
//! use fspath::escape::{escape, unescape};
//!
//! assert_eq!(escape("a<b"), "a%3cb");
//! assert_eq!(unescape("a%3cb"), "a<b");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// The canonical directory separator.
pub const DIRECTORY_SEPARATOR: char = '\\';

/// The alternate directory separator, normalized away during parsing.
pub const ALT_DIRECTORY_SEPARATOR: char = '/';

/// Separator between a volume name and the rest of a root segment.
pub const VOLUME_SEPARATOR: char = ':';

/// Separator between paths in a path list.
pub const LIST_SEPARATOR: char = ';';

/// The character that introduces a 3-character escape token.
pub const ESCAPE_CHAR: char = '%';

/// Every restricted character paired with its escape token.
///
/// The volume and list separators are deliberately absent: they are invalid
/// in a file name (see [`is_valid_name`]) but pass through escaping
/// untouched, so a root segment like `C:` keeps its separator on the wire.
///
/// The `"%93"` token for the quote character is historical; it predates this
/// implementation and is kept for compatibility with persisted strings.
const ESCAPE_PAIRS: [(char, &str); 39] = [
    (DIRECTORY_SEPARATOR, "%5c"),
    (ALT_DIRECTORY_SEPARATOR, "%2f"),
    ('"', "%93"),
    ('<', "%3c"),
    ('>', "%3e"),
    ('|', "%7c"),
    (ESCAPE_CHAR, "%25"),
    ('\u{00}', "%00"),
    ('\u{01}', "%01"),
    ('\u{02}', "%02"),
    ('\u{03}', "%03"),
    ('\u{04}', "%04"),
    ('\u{05}', "%05"),
    ('\u{06}', "%06"),
    ('\u{07}', "%07"),
    ('\u{08}', "%08"),
    ('\u{09}', "%09"),
    ('\u{0a}', "%0a"),
    ('\u{0b}', "%0b"),
    ('\u{0c}', "%0c"),
    ('\u{0d}', "%0d"),
    ('\u{0e}', "%0e"),
    ('\u{0f}', "%0f"),
    ('\u{10}', "%10"),
    ('\u{11}', "%11"),
    ('\u{12}', "%12"),
    ('\u{13}', "%13"),
    ('\u{14}', "%14"),
    ('\u{15}', "%15"),
    ('\u{16}', "%16"),
    ('\u{17}', "%17"),
    ('\u{18}', "%18"),
    ('\u{19}', "%19"),
    ('\u{1a}', "%1a"),
    ('\u{1b}', "%1b"),
    ('\u{1c}', "%1c"),
    ('\u{1d}', "%1d"),
    ('\u{1e}', "%1e"),
    ('\u{1f}', "%1f"),
];

static ESCAPE_TABLE: LazyLock<HashMap<char, &'static str>> =
    LazyLock::new(|| ESCAPE_PAIRS.iter().copied().collect());

static UNESCAPE_TABLE: LazyLock<HashMap<&'static str, char>> =
    LazyLock::new(|| ESCAPE_PAIRS.iter().map(|&(c, t)| (t, c)).collect());

/// Check whether `text` is usable as a file name.
///
/// Rejects empty or all-whitespace strings and any string containing a
/// restricted character, the volume separator, or the list separator. The
/// escape character is fine in a name; escaping exists precisely so it can
/// be. Characters listed in `except` are tolerated, which lets a root
/// segment keep its volume separator.
///
/// # Examples
///
/// ```
/// use fspath::escape::{is_valid_name, VOLUME_SEPARATOR};
///
/// assert!(is_valid_name("report.txt", &[]));
/// assert!(!is_valid_name("a<b", &[]));
/// assert!(!is_valid_name("C:", &[]));
/// assert!(is_valid_name("C:", &[VOLUME_SEPARATOR]));
/// ```
#[must_use]
pub fn is_valid_name(text: &str, except: &[char]) -> bool {
    if text.trim().is_empty() {
        return false;
    }

    text.chars().all(|c| {
        except.contains(&c)
            || c == ESCAPE_CHAR
            || !(c == VOLUME_SEPARATOR || c == LIST_SEPARATOR || ESCAPE_TABLE.contains_key(&c))
    })
}

/// Check whether `text` contains any restricted character.
///
/// Short-circuits on the first hit.
///
/// # Examples
///
/// ```
/// use fspath::escape::needs_escaping;
///
/// assert!(needs_escaping("a<b"));
/// assert!(!needs_escaping("plain name.txt"));
/// ```
#[must_use]
pub fn needs_escaping(text: &str) -> bool {
    text.chars().any(|c| ESCAPE_TABLE.contains_key(&c))
}

/// Replace every restricted character in `text` with its escape token.
///
/// Returns the input unchanged (and unallocated) when nothing needs
/// escaping. The escape character itself is always escaped, so the output
/// never contains an accidental token.
///
/// # Examples
///
/// ```
/// use fspath::escape::escape;
///
/// assert_eq!(escape("plain"), "plain");
/// assert_eq!(escape("50%"), "50%25");
/// ```
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !needs_escaping(text) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match ESCAPE_TABLE.get(&c) {
            Some(token) => out.push_str(token),
            None => out.push(c),
        }
    }

    Cow::Owned(out)
}

/// Try to replace escape tokens in `text` with their original characters.
///
/// Scans for the escape character; each occurrence followed by at least two
/// characters forms a candidate token, with the two trailing characters
/// case-normalized to lower case before lookup. Unrecognized candidates are
/// emitted literally rather than treated as an error, which keeps the
/// decoder robust against partially-malformed input at the cost of
/// ambiguity when literal text happens to resemble a token.
///
/// Returns `Some` with the decoded string iff at least one token was
/// recognized, `None` when the input would come back unchanged.
///
/// # Examples
///
/// ```
/// use fspath::escape::try_unescape;
///
/// assert_eq!(try_unescape("a%3cb"), Some("a<b".to_string()));
/// assert_eq!(try_unescape("no tokens here"), None);
/// assert_eq!(try_unescape("%zz"), None);
/// ```
#[must_use]
pub fn try_unescape(text: &str) -> Option<String> {
    if !text.contains(ESCAPE_CHAR) {
        return None;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut recognized = false;

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == ESCAPE_CHAR && i + 2 < chars.len() {
            let token: String = [
                chars[i],
                chars[i + 1].to_ascii_lowercase(),
                chars[i + 2].to_ascii_lowercase(),
            ]
            .into_iter()
            .collect();

            if let Some(&original) = UNESCAPE_TABLE.get(token.as_str()) {
                out.push(original);
                recognized = true;
            } else {
                // Unknown token: emit the original three characters as-is.
                out.push(chars[i]);
                out.push(chars[i + 1]);
                out.push(chars[i + 2]);
            }

            i += 3;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    if recognized {
        Some(out)
    } else {
        None
    }
}

/// Replace escape tokens in `text` with their original characters.
///
/// Returns the input unchanged (and unallocated) when no token is
/// recognized. See [`try_unescape`] for the token-recognition rules.
///
/// # Examples
///
/// ```
/// use fspath::escape::unescape;
///
/// assert_eq!(unescape("a%3cb"), "a<b");
/// assert_eq!(unescape("plain"), "plain");
/// ```
#[must_use]
pub fn unescape(text: &str) -> Cow<'_, str> {
    match try_unescape(text) {
        Some(decoded) => Cow::Owned(decoded),
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_escaping_detects_restricted_characters() {
        assert!(needs_escaping("a<b"));
        assert!(needs_escaping("a\\b"));
        assert!(needs_escaping("a/b"));
        assert!(needs_escaping("a%b"));
        assert!(needs_escaping("a\u{01}b"));
        // The volume and list separators are invalid in names but are not
        // escape-relevant.
        assert!(!needs_escaping("C:"));
        assert!(!needs_escaping("a;b"));
        assert!(!needs_escaping("archive.tar.gz"));
        assert!(!needs_escaping(""));
    }

    #[test]
    fn test_escape_identity_fast_path() {
        let escaped = escape("plain name");
        assert!(matches!(escaped, Cow::Borrowed(_)));
        assert_eq!(escaped, "plain name");
    }

    #[test]
    fn test_escape_substitutes_tokens() {
        assert_eq!(escape("a<b"), "a%3cb");
        assert_eq!(escape("a>b"), "a%3eb");
        assert_eq!(escape("a|b"), "a%7cb");
        assert_eq!(escape("a\"b"), "a%93b");
        assert_eq!(escape("a\\b"), "a%5cb");
        assert_eq!(escape("a/b"), "a%2fb");
        assert_eq!(escape("50%"), "50%25");
        assert_eq!(escape("a\u{0a}b"), "a%0ab");
        assert_eq!(escape("\u{1f}"), "%1f");
    }

    #[test]
    fn test_unescape_round_trip() {
        for text in ["a<b", "a\\b:c;d", "100%", "\u{00}\u{1f}", "<>|\"", "plain"] {
            assert_eq!(unescape(&escape(text)), text);
        }
    }

    #[test]
    fn test_unescape_token_case_insensitive() {
        assert_eq!(unescape("a%3Cb"), "a<b");
        assert_eq!(unescape("a%3cb"), "a<b");
        assert_eq!(unescape("a%0Ab"), "a\u{0a}b");
    }

    #[test]
    fn test_unescape_unknown_token_passes_through() {
        assert_eq!(try_unescape("%zz"), None);
        assert_eq!(unescape("%zz"), "%zz");
        // One real token next to an unknown one still counts as recognized.
        assert_eq!(try_unescape("%zz%3c"), Some("%zz<".to_string()));
    }

    #[test]
    fn test_unescape_trailing_escape_char_is_literal() {
        assert_eq!(try_unescape("abc%"), None);
        assert_eq!(try_unescape("abc%5"), None);
        assert_eq!(unescape("abc%"), "abc%");
    }

    #[test]
    fn test_unescape_consumes_three_characters_per_candidate() {
        // The scan skips a full candidate even when unrecognized, so the
        // token starting inside it is not seen.
        assert_eq!(try_unescape("%%25"), None);
        assert_eq!(unescape("%%25"), "%%25");
    }

    #[test]
    fn test_escaped_escape_char_survives() {
        // A literal string that looks like a token survives a full cycle
        // because the escape character itself gets encoded.
        assert_eq!(escape("%3c"), "%253c");
        assert_eq!(unescape("%253c"), "%3c");
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("report.txt", &[]));
        assert!(is_valid_name("50%", &[]));
        assert!(!is_valid_name("", &[]));
        assert!(!is_valid_name("   ", &[]));
        assert!(!is_valid_name("a<b", &[]));
        assert!(!is_valid_name("a\\b", &[]));
        assert!(!is_valid_name("a;b", &[]));
        assert!(!is_valid_name("C:", &[]));
        assert!(is_valid_name("C:", &[VOLUME_SEPARATOR]));
    }

    #[test]
    fn test_table_is_bijective() {
        assert_eq!(ESCAPE_TABLE.len(), ESCAPE_PAIRS.len());
        assert_eq!(UNESCAPE_TABLE.len(), ESCAPE_PAIRS.len());
        for (c, token) in ESCAPE_PAIRS {
            assert_eq!(UNESCAPE_TABLE.get(token).copied(), Some(c));
            assert_eq!(token.len(), 3);
            assert!(token.starts_with(ESCAPE_CHAR));
        }
    }
}

//! The immutable path value and its algebra.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::ops::Index;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::escape;
use crate::kind::PathKind;
use crate::parse;

/// The reserved segment meaning "go up one level" in a relative path.
pub const ASCENT_MARKER: &str = "..";

/// The reserved token prefixing serialized [`PathKind::Unknown`] paths.
pub const UNKNOWN_MARKER: &str = "??";

/// Choice of separator for serializing a path.
///
/// # Examples
///
/// ```
/// use fspath::{FsPath, Separator};
///
/// let path = FsPath::parse("C:\\a\\b").unwrap();
/// assert_eq!(path.to_path_string(Separator::Directory), "C:\\a\\b");
/// assert_eq!(path.to_path_string(Separator::Alt), "C:/a/b");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// The canonical directory separator, `\`.
    #[default]
    Directory,
    /// The alternate directory separator, `/`.
    Alt,
}

impl Separator {
    /// The separator as a character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Directory => escape::DIRECTORY_SEPARATOR,
            Self::Alt => escape::ALT_DIRECTORY_SEPARATOR,
        }
    }
}

/// An immutable hierarchical path: a kind plus a non-empty sequence of
/// non-empty segments.
///
/// Unlike a plain string, an `FsPath` can hold segments containing
/// restricted characters; they are escaped on the way out and decoded on the
/// way in, so any segment survives a round trip through the serialized form.
///
/// Derived values (hash, extension, name without extension) are computed on
/// first access and memoized. The value itself never changes after
/// construction, so concurrent readers need no synchronization.
///
/// # Examples
///
/// ```
/// use fspath::{FsPath, PathKind};
///
/// let path = FsPath::parse("C:\\projects\\report.txt").unwrap();
/// assert_eq!(path.kind(), PathKind::Absolute);
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.name(), "report.txt");
/// assert_eq!(path.extension(), "txt");
///
/// let parent = path.parent().unwrap();
/// assert_eq!(parent.to_string(), "C:\\projects");
/// ```
#[derive(Debug, Clone)]
pub struct FsPath {
    kind: PathKind,
    segments: Vec<String>,
    was_escaped: bool,
    cached_hash: OnceLock<u64>,
    cached_extension: OnceLock<String>,
    cached_stem: OnceLock<String>,
}

/// Locale-independent case-insensitive comparison.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl FsPath {
    /// Parse a pre-escaped path string, classifying its kind from the prefix.
    ///
    /// The alternate separator is accepted anywhere and normalized. Escape
    /// tokens inside segments are decoded; if any were present, the path
    /// re-escapes its segments when serialized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPath`] for an empty or separator-only string
    /// and [`Error::InvalidSegment`] when splitting produces an empty
    /// segment (doubled separators inside the path).
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::{FsPath, PathKind};
    ///
    /// let path = FsPath::parse("C:\\docs\\a%3cb").unwrap();
    /// assert_eq!(path.kind(), PathKind::Absolute);
    /// assert_eq!(path.segment(2), Some("a<b"));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        parse::parse_str(input, None, true).map(Self::from_parsed)
    }

    /// Parse a literal path string, classifying its kind from the prefix.
    ///
    /// No escape decoding happens; segments are taken verbatim, and the path
    /// will escape them on serialization if they contain restricted
    /// characters.
    ///
    /// # Errors
    ///
    /// Same conditions as [`parse`](Self::parse).
    pub fn parse_literal(input: &str) -> Result<Self> {
        parse::parse_str(input, None, false).map(Self::from_parsed)
    }

    /// Parse a pre-escaped path string under an explicitly given kind.
    ///
    /// # Errors
    ///
    /// Same conditions as [`parse`](Self::parse).
    pub fn parse_as(kind: PathKind, input: &str) -> Result<Self> {
        parse::parse_str(input, Some(kind), true).map(Self::from_parsed)
    }

    /// Parse a literal path string under an explicitly given kind.
    ///
    /// # Errors
    ///
    /// Same conditions as [`parse`](Self::parse).
    pub fn parse_literal_as(kind: PathKind, input: &str) -> Result<Self> {
        parse::parse_str(input, Some(kind), false).map(Self::from_parsed)
    }

    /// Build a path directly from segments, bypassing string splitting.
    ///
    /// Segments are taken literally; restricted characters are fine and will
    /// be escaped on serialization.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPath`] for an empty iterator and
    /// [`Error::InvalidSegment`] for any empty segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::{FsPath, PathKind};
    ///
    /// let path = FsPath::from_segments(PathKind::Absolute, ["C:", "a", "b"]).unwrap();
    /// assert_eq!(path.to_string(), "C:\\a\\b");
    /// ```
    pub fn from_segments<I, S>(kind: PathKind, segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() {
            return Err(Error::EmptyPath);
        }
        for (index, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(Error::InvalidSegment { index });
            }
        }

        Ok(Self::from_parts(kind, segments))
    }

    fn from_parsed(parsed: parse::Parsed) -> Self {
        Self {
            kind: parsed.kind,
            segments: parsed.segments,
            was_escaped: parsed.was_escaped,
            cached_hash: OnceLock::new(),
            cached_extension: OnceLock::new(),
            cached_stem: OnceLock::new(),
        }
    }

    /// Construct from segments known to be non-empty.
    fn from_parts(kind: PathKind, segments: Vec<String>) -> Self {
        let was_escaped = segments.iter().any(|s| escape::needs_escaping(s));
        Self {
            kind,
            segments,
            was_escaped,
            cached_hash: OnceLock::new(),
            cached_extension: OnceLock::new(),
            cached_stem: OnceLock::new(),
        }
    }

    /// The kind of this path.
    #[must_use]
    pub const fn kind(&self) -> PathKind {
        self.kind
    }

    /// The number of segments; always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments. Never true for a constructed path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment at `index`, if present.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// All segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment, unmodified.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::FsPath;
    ///
    /// let path = FsPath::parse("C:\\docs\\report.txt").unwrap();
    /// assert_eq!(path.name(), "report.txt");
    /// ```
    #[must_use]
    pub fn name(&self) -> &str {
        self.segments[self.segments.len() - 1].as_str()
    }

    /// Whether serialization must re-escape segments.
    #[must_use]
    pub const fn was_escaped(&self) -> bool {
        self.was_escaped
    }

    /// The extension of the last segment, lower-cased and without the dot.
    ///
    /// Only the final dot-delimited suffix counts; multi-part suffixes are
    /// not decomposed. Empty when the segment has no dot or ends with one.
    /// Memoized on first access.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::FsPath;
    ///
    /// let path = FsPath::parse("C:\\archive.tar.gz").unwrap();
    /// assert_eq!(path.extension(), "gz");
    /// ```
    #[must_use]
    pub fn extension(&self) -> &str {
        self.cached_extension.get_or_init(|| {
            let name = self.name();
            match name.rfind('.') {
                Some(dot) if dot + 1 < name.len() => name[dot + 1..].to_lowercase(),
                _ => String::new(),
            }
        })
    }

    /// The last segment with its extension (and the dot) removed.
    ///
    /// Unchanged when [`extension`](Self::extension) is empty. Memoized on
    /// first access.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::FsPath;
    ///
    /// let path = FsPath::parse("C:\\archive.tar.gz").unwrap();
    /// assert_eq!(path.name_without_extension(), "archive.tar");
    /// ```
    #[must_use]
    pub fn name_without_extension(&self) -> &str {
        self.cached_stem.get_or_init(|| {
            let name = self.name();
            match name.rfind('.') {
                Some(dot) if dot + 1 < name.len() => name[..dot].to_string(),
                _ => name.to_string(),
            }
        })
    }

    /// A new path of the same kind without the last segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooShort`] on a one-segment path and
    /// [`Error::AmbiguousAscent`] when the last segment is the ascent
    /// marker, since what it ascends to is not knowable from this value.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::{Error, FsPath};
    ///
    /// let path = FsPath::parse("C:\\a\\b").unwrap();
    /// assert_eq!(path.parent().unwrap().to_string(), "C:\\a");
    ///
    /// let root = FsPath::parse("C:\\").unwrap();
    /// assert_eq!(root.parent().unwrap_err(), Error::TooShort);
    /// ```
    pub fn parent(&self) -> Result<Self> {
        if self.segments.len() == 1 {
            return Err(Error::TooShort);
        }
        if self.name() == ASCENT_MARKER {
            return Err(Error::AmbiguousAscent);
        }

        Ok(Self::from_parts(
            self.kind,
            self.segments[..self.segments.len() - 1].to_vec(),
        ))
    }

    /// A length-1 path holding only the root segment.
    ///
    /// A one-segment absolute path returns a clone of itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongKind`] unless the path is
    /// [`PathKind::Absolute`]; only absolute paths carry a root.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::FsPath;
    ///
    /// let path = FsPath::parse("C:\\a\\b").unwrap();
    /// assert_eq!(path.root().unwrap().to_string(), "C:\\");
    /// ```
    pub fn root(&self) -> Result<Self> {
        if self.kind != PathKind::Absolute {
            return Err(Error::WrongKind {
                expected: PathKind::Absolute,
                found: self.kind,
            });
        }
        if self.segments.len() == 1 {
            return Ok(self.clone());
        }

        Ok(Self::from_parts(self.kind, vec![self.segments[0].clone()]))
    }

    /// A new path of the same kind with `extra` segments appended verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSegment`] for any empty extra segment; the
    /// reported index is the position in the combined path.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::{FsPath, PathKind};
    ///
    /// let root = FsPath::from_segments(PathKind::Absolute, ["C:"]).unwrap();
    /// let path = root.combine(["a", "b"]).unwrap();
    /// assert_eq!(path.to_string(), "C:\\a\\b");
    /// ```
    pub fn combine<I, S>(&self, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments = self.segments.clone();
        for segment in extra.into_iter().map(Into::into) {
            if segment.is_empty() {
                return Err(Error::InvalidSegment {
                    index: segments.len(),
                });
            }
            segments.push(segment);
        }

        Ok(Self::from_parts(self.kind, segments))
    }

    /// Convert this absolute path into one relative to `other`.
    ///
    /// Both paths are scanned from the start for the first case-insensitive
    /// divergence. The result ascends once per remaining segment of `other`,
    /// then descends through the remaining segments of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongKind`] unless both paths are
    /// [`PathKind::Absolute`], [`Error::RootMismatch`] when the root
    /// segments differ, and [`Error::IdenticalPaths`] when the paths are
    /// structurally equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::FsPath;
    ///
    /// let this = FsPath::parse("C:\\a\\b\\c").unwrap();
    /// let other = FsPath::parse("C:\\a\\x").unwrap();
    /// let relative = this.make_relative(&other).unwrap();
    /// assert_eq!(relative.to_string(), "..\\b\\c");
    /// ```
    pub fn make_relative(&self, other: &Self) -> Result<Self> {
        if other.kind != PathKind::Absolute {
            return Err(Error::WrongKind {
                expected: PathKind::Absolute,
                found: other.kind,
            });
        }
        if self.kind != PathKind::Absolute {
            return Err(Error::WrongKind {
                expected: PathKind::Absolute,
                found: self.kind,
            });
        }
        if !eq_ignore_case(&self.segments[0], &other.segments[0]) {
            return Err(Error::RootMismatch {
                left: self.segments[0].clone(),
                right: other.segments[0].clone(),
            });
        }
        if self == other {
            return Err(Error::IdenticalPaths);
        }

        let shorter = self.segments.len().min(other.segments.len());
        let divergence = (0..shorter)
            .find(|&i| !eq_ignore_case(&self.segments[i], &other.segments[i]))
            .unwrap_or(shorter);

        let mut segments = Vec::with_capacity(
            (other.segments.len() - divergence) + (self.segments.len() - divergence),
        );
        segments.extend((divergence..other.segments.len()).map(|_| ASCENT_MARKER.to_string()));
        segments.extend(self.segments[divergence..].iter().cloned());

        log::trace!(
            "made {self} relative to {other}: diverged at segment {divergence}"
        );

        Ok(Self::from_parts(PathKind::Relative, segments))
    }

    /// Convert this relative path into an absolute one anchored at `base`.
    ///
    /// The leading run of ascent markers is counted and that many trailing
    /// segments are dropped from `base`; the rest of `self` is appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongKind`] unless `self` is [`PathKind::Relative`]
    /// and `base` is [`PathKind::Absolute`], and [`Error::AscentPastRoot`]
    /// when the ascent run is at least as long as `base` — index arithmetic
    /// must never silently truncate past the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::FsPath;
    ///
    /// let relative = FsPath::parse("..\\b\\c").unwrap();
    /// let base = FsPath::parse("C:\\a\\x").unwrap();
    /// let absolute = relative.make_absolute(&base).unwrap();
    /// assert_eq!(absolute.to_string(), "C:\\a\\b\\c");
    /// ```
    pub fn make_absolute(&self, base: &Self) -> Result<Self> {
        if base.kind != PathKind::Absolute {
            return Err(Error::WrongKind {
                expected: PathKind::Absolute,
                found: base.kind,
            });
        }
        if self.kind != PathKind::Relative {
            return Err(Error::WrongKind {
                expected: PathKind::Relative,
                found: self.kind,
            });
        }

        let ascents = self
            .segments
            .iter()
            .take_while(|s| s.as_str() == ASCENT_MARKER)
            .count();

        if ascents >= base.segments.len() {
            return Err(Error::AscentPastRoot {
                ascents,
                base_len: base.segments.len(),
            });
        }

        let mut segments = base.segments[..base.segments.len() - ascents].to_vec();
        segments.extend(self.segments[ascents..].iter().cloned());

        Ok(Self::from_parts(PathKind::Absolute, segments))
    }

    /// Serialize with the chosen separator.
    ///
    /// Relative paths get one leading separator unless they start with the
    /// ascent marker; unknown paths get the marker prefix. Segments are
    /// escaped when the path carries restricted characters. A bare root gets
    /// asymmetric treatment so the string stays unambiguous to URI-style
    /// parsers: a volume root gains a trailing separator, a share root two
    /// leading ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::{FsPath, Separator};
    ///
    /// let path = FsPath::parse("C:\\a\\b").unwrap();
    /// assert_eq!(path.to_path_string(Separator::Alt), "C:/a/b");
    /// ```
    #[must_use]
    pub fn to_path_string(&self, separator: Separator) -> String {
        let sep = separator.as_char();
        let mut out = String::new();

        match self.kind {
            PathKind::Relative => {
                if self.segments[0] != ASCENT_MARKER {
                    out.push(sep);
                }
            }
            PathKind::Unknown => {
                out.push_str(UNKNOWN_MARKER);
                out.push(sep);
            }
            PathKind::Absolute => {}
        }

        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            if self.was_escaped {
                out.push_str(&escape::escape(segment));
            } else {
                out.push_str(segment);
            }
        }

        if self.kind == PathKind::Absolute && self.segments.len() == 1 {
            if self.segments[0].ends_with(escape::VOLUME_SEPARATOR) {
                out.push(sep);
            } else {
                out.insert(0, sep);
                out.insert(0, sep);
            }
        }

        out
    }

    /// The memoized hash of the kind and the case-folded segments.
    ///
    /// Folds each segment with the same per-character lowering equality
    /// uses, so two equal paths hash equally even when their serialized
    /// forms differ (one escaped, one not).
    fn canonical_hash(&self) -> u64 {
        *self.cached_hash.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            self.kind.hash(&mut hasher);
            for segment in &self.segments {
                for c in segment.chars().flat_map(char::to_lowercase) {
                    c.hash(&mut hasher);
                }
                // Segment boundary; keeps ["ab","c"] and ["a","bc"] apart.
                hasher.write_u8(0xff);
            }
            hasher.finish()
        })
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path_string(Separator::Directory))
    }
}

impl FromStr for FsPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for FsPath {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| eq_ignore_case(a, b))
    }
}

impl Eq for FsPath {}

impl Hash for FsPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.canonical_hash());
    }
}

impl Index<usize> for FsPath {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.segments[index]
    }
}

impl Serialize for FsPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FsPath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

//! Path kind classification.

use std::fmt;

/// Classification of a path by its root status.
///
/// The kind determines how a path serializes and which algebraic operations
/// apply to it:
///
/// - **Absolute** paths carry a root or volume segment and support
///   [`root`](crate::FsPath::root) and [`make_relative`](crate::FsPath::make_relative).
/// - **Relative** paths carry no root, may start with a run of ascent
///   markers, and support [`make_absolute`](crate::FsPath::make_absolute).
/// - **Unknown** paths have an undetermined root status and serialize behind
///   a fixed marker prefix.
///
/// # Examples
///
/// ```
/// use fspath::{FsPath, PathKind};
///
/// let path = FsPath::parse("C:\\projects").unwrap();
/// assert_eq!(path.kind(), PathKind::Absolute);
///
/// let path = FsPath::parse("\\projects\\src").unwrap();
/// assert_eq!(path.kind(), PathKind::Relative);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// The path starts from a root or volume segment.
    Absolute,

    /// The path is anchored to some unstated base and may ascend from it.
    Relative,

    /// The root status of the path cannot be determined.
    Unknown,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::Relative => write!(f, "relative"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

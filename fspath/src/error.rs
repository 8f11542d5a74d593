//! Error types for the fspath library.
//!
//! Every failure in this crate is a precondition violation on an otherwise
//! pure operation, using `thiserror` for ergonomic error handling. Nothing
//! here is transient and nothing is worth retrying.

use thiserror::Error;

use crate::kind::PathKind;

/// Result type alias for operations that may fail with a path error.
///
/// # Examples
///
/// ```
/// use fspath::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the fspath library.
///
/// This enum encompasses all possible error conditions that can occur while
/// constructing or deriving path values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parent was requested on a path with a single segment.
    #[error("cannot take parent: path has only one segment")]
    TooShort,

    /// A parent was requested when the last segment is the ascent marker.
    ///
    /// The parent of `..` depends on a base path this value does not carry,
    /// so the request cannot be answered.
    #[error("cannot take parent: last segment is the ascent marker")]
    AmbiguousAscent,

    /// An operation was invoked on a path of an unsupported kind.
    #[error("wrong path kind: expected {expected}, found {found}")]
    WrongKind {
        /// The kind the operation requires.
        expected: PathKind,
        /// The kind the path actually has.
        found: PathKind,
    },

    /// Two absolute paths with different root segments were given to
    /// [`make_relative`](crate::FsPath::make_relative).
    #[error("root mismatch: {left:?} vs {right:?}")]
    RootMismatch {
        /// The root segment of the path being converted.
        left: String,
        /// The root segment of the path converted against.
        right: String,
    },

    /// Two structurally equal paths were given to
    /// [`make_relative`](crate::FsPath::make_relative).
    #[error("cannot make relative: paths are structurally equal")]
    IdenticalPaths,

    /// An empty segment was supplied or produced during construction.
    #[error("invalid segment at index {index}: segments must be non-empty")]
    InvalidSegment {
        /// The position of the offending segment.
        index: usize,
    },

    /// An empty string or empty segment list was supplied to a constructor.
    #[error("empty path: at least one segment is required")]
    EmptyPath,

    /// A relative path ascends further than its base path can support.
    #[error("ascent past root: {ascents} ascent marker(s) against a {base_len}-segment base")]
    AscentPastRoot {
        /// The number of leading ascent markers in the relative path.
        ascents: usize,
        /// The number of segments in the base path.
        base_len: usize,
    },
}

#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # fspath
//!
//! Immutable hierarchical file-system path values with lossless character
//! escaping.
//!
//! An [`FsPath`] is a kind ([`PathKind`]: absolute, relative, or unknown)
//! plus an ordered, non-empty sequence of non-empty segments. Unlike a plain
//! string, a segment may contain characters the serialized form reserves for
//! itself; a fixed escape table maps each restricted character to a
//! 3-character token so every segment survives a round trip through a single
//! string.
//!
//! On top of the value sits a small algebra: parent and root extraction,
//! segment concatenation, and conversion between absolute and relative
//! paths by longest-common-prefix divergence and ascent counting.
//!
//! ## Core Types
//!
//! - [`FsPath`]: the immutable path value
//! - [`PathKind`]: absolute / relative / unknown classification
//! - [`Separator`]: serialization separator choice
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use fspath::{FsPath, PathKind};
//!
//! let report = FsPath::parse("C:\\projects\\report.txt")?;
//! assert_eq!(report.kind(), PathKind::Absolute);
//! assert_eq!(report.extension(), "txt");
//!
//! let backups = FsPath::parse("C:\\backups")?;
//! let relative = report.make_relative(&backups)?;
//! assert_eq!(relative.to_string(), "..\\projects\\report.txt");
//! assert_eq!(relative.make_absolute(&backups)?, report);
//! # Ok::<(), fspath::Error>(())
//! ```

pub mod error;
pub mod escape;
mod kind;
mod parse;
mod path;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use kind::PathKind;
pub use path::{FsPath, Separator, ASCENT_MARKER, UNKNOWN_MARKER};

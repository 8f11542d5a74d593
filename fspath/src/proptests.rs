//! Property-based tests for the path core.
//!
//! The escape codec and the relative/absolute conversions both claim
//! round-trip laws; this module checks them against generated input rather
//! than hand-picked cases.

use proptest::prelude::*;

use crate::escape::{escape, needs_escaping, unescape};
use crate::{FsPath, PathKind};

// Strategy for generating benign path segments. Deliberately free of dots so
// the ascent marker can never be generated as a literal segment.
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,12}"
}

fn absolute_path_strategy() -> impl Strategy<Value = FsPath> {
    prop::collection::vec(segment_strategy(), 0..6).prop_map(|tail| {
        let mut segments = vec!["C:".to_string()];
        segments.extend(tail);
        FsPath::from_segments(PathKind::Absolute, segments).unwrap()
    })
}

fn std_hash(path: &FsPath) -> u64 {
    use std::hash::{DefaultHasher, Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Escaping round-trips for every string: the escape character is itself
    // escaped on the way out, so no literal text can fake a token.
    #[test]
    fn escape_round_trip_arbitrary(text in any::<String>()) {
        let escaped = escape(&text);
        let unescaped = unescape(&escaped);
        prop_assert_eq!(unescaped.as_ref(), text.as_str());
    }

    // Same law, concentrated on the restricted alphabet.
    #[test]
    fn escape_round_trip_restricted(text in "[a-z<>|\"%\\\\/:;\\x00-\\x1f]{0,24}") {
        let escaped = escape(&text);
        let unescaped = unescape(&escaped);
        prop_assert_eq!(unescaped.as_ref(), text.as_str());
    }

    // escape() changes a string exactly when needs_escaping() says so.
    #[test]
    fn escape_changes_iff_needed(text in any::<String>()) {
        prop_assert_eq!(needs_escaping(&text), escape(&text) != text.as_str());
    }

    // Parse/display round trip preserves structural equality.
    #[test]
    fn parse_display_round_trip(path in absolute_path_strategy()) {
        let reparsed = FsPath::parse(&path.to_string()).unwrap();
        prop_assert_eq!(reparsed, path);
    }

    // Relative conversion inverts against the same base.
    #[test]
    fn make_relative_make_absolute_round_trip(
        this in absolute_path_strategy(),
        base in absolute_path_strategy(),
    ) {
        if this != base {
            let relative = this.make_relative(&base).unwrap();
            prop_assert_eq!(relative.kind(), PathKind::Relative);
            let restored = relative.make_absolute(&base).unwrap();
            prop_assert_eq!(restored, this);
        }
    }

    // Case changes never affect equality or hashing.
    #[test]
    fn equality_ignores_case(path in absolute_path_strategy()) {
        let upper: Vec<String> = path
            .segments()
            .iter()
            .map(|s| s.to_uppercase())
            .collect();
        let upper_path = FsPath::from_segments(path.kind(), upper).unwrap();

        prop_assert_eq!(&upper_path, &path);
        prop_assert_eq!(std_hash(&upper_path), std_hash(&path));
    }

    // parent() undoes combine() of one segment.
    #[test]
    fn parent_undoes_combine(path in absolute_path_strategy(), extra in segment_strategy()) {
        let combined = path.combine([extra]).unwrap();
        prop_assert_eq!(combined.parent().unwrap(), path);
    }
}

//! Pattern tokens: the smallest comparable unit of a route.
//!
//! A route pattern is written as plain strings, one per path segment:
//!
//! | Source     | Token         | Matches                                  |
//! |------------|---------------|------------------------------------------|
//! | `edit`     | `Literal`     | exactly `edit` (case-sensitive)          |
//! | `{i}`      | `IntArg`      | a base-10 integer, nothing else          |
//! | `{s}`      | `StringArg`   | anything that is *not* an integer        |
//! | `{i\|\|s}` | `AnyArg`      | any segment                              |
//! | `{/}`      | `IndexMarker` | the index sentinel (no segment supplied) |
//!
//! The wildcard markers are detected as substrings, so `id{i}` is an
//! `IntArg` too. Sources are parsed once, at registration.

use std::fmt;

/// The segment value the path parser emits when a request names a
/// controller but no further path. It contains `/`, so a real segment can
/// never collide with it.
pub const INDEX: &str = "{/}";

const ANY: &str = "{i||s}";
const INT: &str = "{i}";
const STR: &str = "{s}";

/// One element of an action pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PatternToken {
    Literal(String),
    IntArg,
    StringArg,
    AnyArg,
    IndexMarker,
}

impl PatternToken {
    /// Infers the token type from its source text.
    ///
    /// `{i||s}` is checked first: it contains neither `{i}` nor `{s}` as a
    /// substring, but an element carrying several markers must still resolve
    /// to the most permissive one.
    pub fn parse(source: &str) -> Self {
        if source.contains(ANY) {
            Self::AnyArg
        } else if source.contains(INT) {
            Self::IntArg
        } else if source.contains(STR) {
            Self::StringArg
        } else if source == INDEX {
            Self::IndexMarker
        } else {
            Self::Literal(source.to_owned())
        }
    }

    /// Decides whether `segment` satisfies this token.
    pub fn matches(&self, segment: &str) -> bool {
        match self {
            Self::Literal(lit) => lit == segment,
            Self::IntArg => is_int(segment),
            Self::StringArg => !is_int(segment),
            Self::AnyArg => true,
            Self::IndexMarker => segment == INDEX,
        }
    }
}

impl fmt::Display for PatternToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => f.write_str(lit),
            Self::IntArg => f.write_str(INT),
            Self::StringArg => f.write_str(STR),
            Self::AnyArg => f.write_str(ANY),
            Self::IndexMarker => f.write_str(INDEX),
        }
    }
}

impl From<&str> for PatternToken {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

/// Whole-segment base-10 integer check. An optional sign is allowed; the
/// value must fit in an `i64`.
pub(crate) fn is_int(segment: &str) -> bool {
    segment.parse::<i64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_infers_type() {
        assert_eq!(PatternToken::parse("edit"), PatternToken::Literal("edit".into()));
        assert_eq!(PatternToken::parse("{i}"), PatternToken::IntArg);
        assert_eq!(PatternToken::parse("{s}"), PatternToken::StringArg);
        assert_eq!(PatternToken::parse("{i||s}"), PatternToken::AnyArg);
        assert_eq!(PatternToken::parse("{/}"), PatternToken::IndexMarker);
        assert_eq!(PatternToken::parse("id{i}"), PatternToken::IntArg);
    }

    #[test]
    fn test_any_takes_priority() {
        assert_eq!(PatternToken::parse("{i}{i||s}"), PatternToken::AnyArg);
        assert_eq!(PatternToken::parse("{s}-{i||s}"), PatternToken::AnyArg);
    }

    #[test]
    fn test_literal_is_exact_and_case_sensitive() {
        let tok = PatternToken::parse("edit");
        assert!(tok.matches("edit"));
        assert!(!tok.matches("Edit"));
        assert!(!tok.matches("edit "));
        assert!(!tok.matches(""));
    }

    #[test]
    fn test_int_and_string_are_disjoint() {
        for seg in ["42", "-7", "+3", "0", "abc", "42a", "4.2", "", " 1", "99999999999999999999"] {
            assert_ne!(
                PatternToken::IntArg.matches(seg),
                PatternToken::StringArg.matches(seg),
                "segment {seg:?}",
            );
        }
        assert!(PatternToken::IntArg.matches("42"));
        assert!(!PatternToken::IntArg.matches("42a"));
        assert!(PatternToken::StringArg.matches("alice"));
        assert!(!PatternToken::StringArg.matches("42"));
    }

    #[test]
    fn test_any_matches_everything() {
        for seg in ["42", "alice", "", INDEX] {
            assert!(PatternToken::AnyArg.matches(seg));
        }
    }

    #[test]
    fn test_index_marker_only_matches_sentinel() {
        assert!(PatternToken::IndexMarker.matches(INDEX));
        assert!(!PatternToken::IndexMarker.matches(""));
        assert!(!PatternToken::IndexMarker.matches("index"));
    }

    #[test]
    fn test_display_round_trips_source() {
        for src in ["edit", "{i}", "{s}", "{i||s}", "{/}"] {
            assert_eq!(PatternToken::parse(src).to_string(), src);
        }
    }
}

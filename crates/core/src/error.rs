//! Error types for parsing and querying commu lines.
//!
//! Every variant maps to a stable diagnostic ID (see [`codes`]) so hosts can
//! report failures without matching on message text. Offsets are byte
//! positions into the text originally handed to
//! [`parse_line`](crate::grammar::parser::parse_line), leading whitespace
//! included.

use thiserror::Error;

/// Diagnostic ID constants.
pub mod codes {
    /// A required token did not match at the cursor.
    pub const MALFORMED_INPUT: &str = "COMMU1001";
    /// A complete group was parsed but text remained after it.
    pub const TRAILING_CONTENT: &str = "COMMU1002";
    /// Groups nested deeper than the parser allows.
    pub const NESTING_TOO_DEEP: &str = "COMMU1003";
    /// A single-value lookup found the key more than once.
    pub const AMBIGUOUS_KEY: &str = "COMMU2001";
}

/// Return a one-line explanation for a diagnostic ID, if it is known.
pub fn explain(id: &str) -> Option<&'static str> {
    match id {
        codes::MALFORMED_INPUT => Some(
            "The line does not follow the `[type key=value ...]` grammar at the reported position.",
        ),
        codes::TRAILING_CONTENT => {
            Some("A commu line holds exactly one top-level group; extra text follows it.")
        }
        codes::NESTING_TOO_DEEP => Some("Nested groups exceed the supported depth."),
        codes::AMBIGUOUS_KEY => Some(
            "The key repeats inside the group; use the list accessor to read every value.",
        ),
        _ => None,
    }
}

/// Failure to parse a commu line. Parsing is all-or-nothing: no partial tree
/// accompanies any of these.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required pattern did not match at the cursor.
    #[error("malformed input at byte {offset}: expected {expected}")]
    MalformedInput {
        /// Byte offset of the cursor when the match failed.
        offset: usize,
        /// Name of the token the grammar required.
        expected: &'static str,
    },

    /// The top-level group parsed, but unconsumed text remained.
    #[error("unexpected trailing content at byte {offset}")]
    TrailingContent {
        /// Byte offset of the first unconsumed character.
        offset: usize,
    },

    /// Groups nested deeper than [`MAX_NESTING`](crate::grammar::parser::MAX_NESTING).
    #[error("groups nested deeper than {limit} levels at byte {offset}")]
    NestingTooDeep {
        /// Byte offset of the `[` that exceeded the limit.
        offset: usize,
        /// The configured nesting limit.
        limit: usize,
    },
}

impl ParseError {
    /// Stable diagnostic ID for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::MalformedInput { .. } => codes::MALFORMED_INPUT,
            ParseError::TrailingContent { .. } => codes::TRAILING_CONTENT,
            ParseError::NestingTooDeep { .. } => codes::NESTING_TOO_DEEP,
        }
    }

    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::MalformedInput { offset, .. }
            | ParseError::TrailingContent { offset }
            | ParseError::NestingTooDeep { offset, .. } => *offset,
        }
    }
}

/// Failure of a post-parse group query.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    /// A single-value lookup found the key more than once.
    #[error("more than one property with key '{key}' found in group ({count} matches)")]
    AmbiguousKey {
        /// The key that was looked up.
        key: String,
        /// How many pairs carry that key.
        count: usize,
    },
}

impl GroupError {
    /// Stable diagnostic ID for this error.
    pub fn code(&self) -> &'static str {
        match self {
            GroupError::AmbiguousKey { .. } => codes::AMBIGUOUS_KEY,
        }
    }
}

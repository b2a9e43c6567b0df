//! Commu line core library.
//!
//! Parses and renders commu lines, the single-line bracketed markup used for
//! stage directions such as `[message text=Hello name=Saki]`. The main entry
//! points are [`parse_line`] for parsing and [`Group::to_line`] /
//! [`emit_line`] for rendering.

#![warn(missing_docs)]

/// Error types and diagnostic IDs.
pub mod error;
/// Escape handling for string values.
pub mod escape;
/// Commu grammar: cursor, parser, tree, emitter.
pub mod grammar;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Parser
pub use grammar::parser::{MAX_NESTING, parse_line};

// Tree
pub use grammar::ast::{Group, Property, PropertyPair};

// Emitter
pub use grammar::emit::{RenderConfig, emit_line};

// Errors
pub use error::{GroupError, ParseError, codes, explain};

// Serialization helpers
pub use grammar::dump::to_pretty_json;

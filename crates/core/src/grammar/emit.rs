//! Commu emitter — renders a [`Group`] tree back into a single line.
//!
//! Blob payloads are replayed byte-for-byte; only string values pass through
//! [`escape_string`].

use std::fmt;

use super::ast::{Group, Property};
use crate::escape::escape_string;

// ── Configuration ───────────────────────────────────────────────────────

/// Configuration for the commu emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Write `=` inside string values as `\=`.
    ///
    /// On by default, which makes every parsed line render back to itself.
    /// Turning it off reproduces the legacy output that escaped newlines
    /// only; such lines fail to reparse when a value contains `=`.
    pub escape_equals: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            escape_equals: true,
        }
    }
}

// ── Public API ──────────────────────────────────────────────────────────

/// Render `group` as a commu line.
pub fn emit_line(group: &Group, config: &RenderConfig) -> String {
    let mut out = String::new();
    emit_group(&mut out, group, config);
    out
}

impl Group {
    /// Render with the default [`RenderConfig`].
    pub fn to_line(&self) -> String {
        emit_line(self, &RenderConfig::default())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        emit_property(&mut out, self, &RenderConfig::default());
        f.write_str(&out)
    }
}

// ── Emission ────────────────────────────────────────────────────────────

fn emit_group(out: &mut String, group: &Group, config: &RenderConfig) {
    out.push('[');
    out.push_str(group.group_type());
    for pair in group.property_pairs() {
        out.push(' ');
        out.push_str(&pair.key);
        out.push('=');
        emit_property(out, &pair.property, config);
    }
    out.push(']');
}

fn emit_property(out: &mut String, property: &Property, config: &RenderConfig) {
    match property {
        Property::Group(g) => emit_group(out, g, config),
        Property::Json(raw) => out.push_str(raw),
        Property::String(s) => out.push_str(&escape_string(s, config.escape_equals)),
    }
}

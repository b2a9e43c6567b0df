use std::sync::LazyLock;

use super::{
    ast::{Group, Property},
    cursor::{Cursor, Pattern},
};
use crate::error::ParseError;
use crate::escape::unescape_string;

/// Deepest group nesting accepted before the parse is abandoned.
pub const MAX_NESTING: usize = 256;

// ─── Token patterns ─────────────────────────────────────────────────────────

/// Characters that may end a type name or value: a pair separator or `]`.
const VALUE_END: &str = r"[ \]]";

/// Blob bodies run until whitespace, with the information separators
/// U+001C..=U+001F counted as whitespace.
const BLOB_BODY: &str = r"[^\s\x1C-\x1F]+";

static OPEN: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("'['", r"(\[)"));
static CLOSE: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("']'", r"(\])"));
static SEPARATOR: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("' '", r"( )"));

static GROUP_TYPE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::followed_by("group type", r"([a-z]+)", VALUE_END));

// The `=` is eaten together with the key.
static KEY: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("key", r"([A-Za-z]+)="));

// Anything but newline, backslash, brackets and `=`, except the two escapes.
static STRING_DATA: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::followed_by(
        "string value",
        r"((?:[^\n\\\[\]=]|\\n|\\=)+)",
        VALUE_END,
    )
});

static JSON_DATA: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::followed_by(
        "json blob",
        &format!(r"(\\\{{{BLOB_BODY}\\\}})"),
        VALUE_END,
    )
});

static CURVE_DATA: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::followed_by(
        "animation curve blob",
        &format!(r"(AnimationCurve::\\\{{{BLOB_BODY}\\\}})"),
        VALUE_END,
    )
});

static AT_CLOSE: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("']'", r"\]"));
static AT_GROUP: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("'['", r"\["));
static AT_CURVE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("animation curve blob", r"AnimationCurve::\\\{"));
static AT_JSON: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("json blob", r"\\\{"));

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse one commu line into its top-level [`Group`].
///
/// Surrounding whitespace is ignored. The line must hold exactly one group;
/// anything after its closing `]` is [`ParseError::TrailingContent`]. Error
/// offsets index into `text` as given.
pub fn parse_line(text: &str) -> Result<Group, ParseError> {
    let trimmed = text.trim_matches(is_line_space);
    let lead = text.len() - text.trim_start_matches(is_line_space).len();
    let mut cursor = Cursor::with_offset(trimmed, lead);

    let result = parse_group(&mut cursor, 0).and_then(|group| {
        if cursor.is_exhausted() {
            Ok(group)
        } else {
            Err(ParseError::TrailingContent {
                offset: cursor.offset(),
            })
        }
    });

    if let Err(err) = &result {
        tracing::debug!(offset = err.offset(), code = err.code(), %err, "commu line rejected");
    }
    result
}

/// Whitespace stripped from both ends of a line.
fn is_line_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

// ─── Grammar ────────────────────────────────────────────────────────────────

/// `"[" group_type (" " key "=" value)* "]"`
fn parse_group(cursor: &mut Cursor<'_>, depth: usize) -> Result<Group, ParseError> {
    if depth >= MAX_NESTING {
        return Err(ParseError::NestingTooDeep {
            offset: cursor.offset(),
            limit: MAX_NESTING,
        });
    }

    cursor.consume(&OPEN)?;
    let mut group = Group::new(cursor.consume(&GROUP_TYPE)?);

    while !cursor.lookahead(&AT_CLOSE) {
        cursor.consume(&SEPARATOR)?;
        let key = cursor.consume(&KEY)?;
        let property = parse_value(cursor, depth)?;
        group.append_property(key, property);
    }

    cursor.consume(&CLOSE)?;
    Ok(group)
}

/// Dispatch on the value's first characters; the first matching shape wins.
fn parse_value(cursor: &mut Cursor<'_>, depth: usize) -> Result<Property, ParseError> {
    if cursor.lookahead(&AT_GROUP) {
        tracing::trace!(offset = cursor.offset(), "nested group");
        return parse_group(cursor, depth + 1).map(Property::Group);
    }
    if cursor.lookahead(&AT_CURVE) {
        tracing::trace!(offset = cursor.offset(), "animation curve blob");
        return Ok(Property::Json(cursor.consume(&CURVE_DATA)?.to_string()));
    }
    if cursor.lookahead(&AT_JSON) {
        tracing::trace!(offset = cursor.offset(), "json blob");
        return Ok(Property::Json(cursor.consume(&JSON_DATA)?.to_string()));
    }
    let raw = cursor.consume(&STRING_DATA)?;
    Ok(Property::String(unescape_string(raw).into_owned()))
}

//! Escape handling for string property values.
//!
//! Inside a string value a real newline is written `\n` and an equals sign is
//! written `\=`. No other backslash sequence exists in the format.

use std::borrow::Cow;

/// Resolve `\n` and `\=` into a newline and `=`.
///
/// A backslash followed by anything else is kept as-is. The grammar never
/// produces one, but hand-built input should not lose characters.
pub fn unescape_string(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n') => {
                    chars.next();
                    out.push('\n');
                    continue;
                }
                Some('=') => {
                    chars.next();
                    out.push('=');
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Write newlines as `\n` and, when `escape_equals` is set, `=` as `\=`.
pub fn escape_string(text: &str, escape_equals: bool) -> Cow<'_, str> {
    let needs = |c: char| c == '\n' || (escape_equals && c == '=');
    if !text.contains(needs) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '=' if escape_equals => out.push_str("\\="),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

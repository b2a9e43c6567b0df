use regex::Regex;

use crate::error::ParseError;

/// An anchored token pattern the [`Cursor`] can test or consume.
///
/// The token itself is capture group 1 of `body`. A pattern built with
/// [`Pattern::followed_by`] also requires `follow` to match right after the
/// token; those characters stay in the input for the next match.
#[derive(Debug)]
pub struct Pattern {
    name: &'static str,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern anchored at the cursor position.
    ///
    /// # Panics
    /// Panics if `body` is not a valid regex. Patterns are compile-time
    /// literals, so this only fires on a programming error.
    pub fn new(name: &'static str, body: &str) -> Self {
        Self::compile(name, format!("^(?:{body})"))
    }

    /// Compile a pattern whose token must be followed by `follow`, which is
    /// checked but not consumed.
    ///
    /// # Panics
    /// Same as [`Pattern::new`].
    pub fn followed_by(name: &'static str, body: &str, follow: &str) -> Self {
        Self::compile(name, format!("^(?:{body})(?P<follow>{follow})"))
    }

    fn compile(name: &'static str, source: String) -> Self {
        let regex = Regex::new(&source)
            .unwrap_or_else(|e| panic!("invalid pattern for {name} ({source}): {e}"));
        Self { name, regex }
    }

    /// Human-readable token name used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Mutable view over the unconsumed suffix of a line.
///
/// Every successful [`consume`](Cursor::consume) drops the matched prefix for
/// good; nothing behind the cursor is examined again.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    rest: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Start a cursor at the beginning of `input`.
    pub fn new(input: &'a str) -> Self {
        Self::with_offset(input, 0)
    }

    /// Start a cursor over `input`, reporting positions shifted by `base`.
    ///
    /// Used when `input` is a slice of a larger text (e.g. after trimming)
    /// and errors should point into the original.
    pub fn with_offset(input: &'a str, base: usize) -> Self {
        Self {
            rest: input,
            offset: base,
        }
    }

    /// Match `pattern` at the current position and advance past it.
    ///
    /// Returns the text of capture group 1 (empty when the pattern has no
    /// group). Fails with [`ParseError::MalformedInput`] when the pattern
    /// does not match here; the cursor is left untouched in that case.
    pub fn consume(&mut self, pattern: &Pattern) -> Result<&'a str, ParseError> {
        let rest = self.rest;
        let Some(caps) = pattern.regex.captures(rest) else {
            return Err(ParseError::MalformedInput {
                offset: self.offset,
                expected: pattern.name,
            });
        };
        let end = match caps.name("follow") {
            Some(follow) => follow.start(),
            None => caps.get(0).map_or(0, |m| m.end()),
        };
        let token = caps.get(1).map_or("", |m| m.as_str());
        self.rest = &rest[end..];
        self.offset += end;
        Ok(token)
    }

    /// Whether `pattern` matches at the current position. Never advances.
    pub fn lookahead(&self, pattern: &Pattern) -> bool {
        pattern.regex.is_match(self.rest)
    }

    /// True once every character has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.rest.is_empty()
    }

    /// Byte offset of the cursor within the original text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The unconsumed suffix.
    pub fn remaining(&self) -> &'a str {
        self.rest
    }
}

//! Splitting an input file into commu lines and parsing each one.

use commu_core::{Group, ParseError, parse_line};
use serde::Serialize;

/// One physical line of the input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceLine<'a> {
    /// 1-based line number.
    pub(crate) number: usize,
    /// Byte offset of the line's first character in the whole input.
    pub(crate) start: usize,
    /// Line content without its terminator.
    pub(crate) text: &'a str,
    /// The terminator (`"\n"`, `"\r\n"`, or `""` on the last line).
    pub(crate) ending: &'a str,
}

impl SourceLine<'_> {
    /// Blank lines are not commu lines and are passed through untouched.
    pub(crate) fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Split `source` into lines, keeping each line's terminator.
pub(crate) fn split_lines(source: &str) -> Vec<SourceLine<'_>> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    for (idx, raw) in source.split_inclusive('\n').enumerate() {
        let body_len = raw
            .strip_suffix("\r\n")
            .or_else(|| raw.strip_suffix('\n'))
            .map_or(raw.len(), str::len);
        lines.push(SourceLine {
            number: idx + 1,
            start,
            text: &raw[..body_len],
            ending: &raw[body_len..],
        });
        start += raw.len();
    }
    lines
}

/// A line that failed to parse, positioned within the whole input.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LineFailure {
    /// 1-based line number.
    pub(crate) line: usize,
    /// 1-based column, counted in characters.
    pub(crate) column: usize,
    /// Byte offset into the whole input.
    pub(crate) offset: usize,
    /// Diagnostic ID.
    pub(crate) code: &'static str,
    /// Human-readable message.
    pub(crate) message: String,
}

impl LineFailure {
    fn new(line: &SourceLine<'_>, err: &ParseError) -> Self {
        let local = err.offset().min(line.text.len());
        Self {
            line: line.number,
            column: line.text[..local].chars().count() + 1,
            offset: line.start + local,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// A successfully parsed line.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ParsedLine {
    /// 1-based line number.
    pub(crate) line: usize,
    /// The parsed tree.
    pub(crate) group: Group,
}

/// Result of parsing every non-blank line of an input.
#[derive(Debug, Default, Serialize)]
pub(crate) struct ParsedSource {
    pub(crate) lines: Vec<ParsedLine>,
    pub(crate) errors: Vec<LineFailure>,
}

/// Parse one source line, converting the error into a positioned failure.
pub(crate) fn parse_source_line(line: &SourceLine<'_>) -> Result<Group, LineFailure> {
    parse_line(line.text).map_err(|err| LineFailure::new(line, &err))
}

/// Parse every non-blank line of `source`.
pub(crate) fn parse_source(source: &str) -> ParsedSource {
    let mut out = ParsedSource::default();
    for line in split_lines(source).iter().filter(|l| !l.is_blank()) {
        match parse_source_line(line) {
            Ok(group) => out.lines.push(ParsedLine {
                line: line.number,
                group,
            }),
            Err(failure) => out.errors.push(failure),
        }
    }
    tracing::info!(
        parsed = out.lines.len(),
        failed = out.errors.len(),
        "parsed commu source"
    );
    out
}

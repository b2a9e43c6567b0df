//! Pretty error rendering using ariadne.
//!
//! Converts [`LineFailure`]s into ariadne [`Report`]s for coloured,
//! source-annotated terminal output. [`Format`] picks between this and the
//! JSON envelopes the commands print themselves.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::lines::LineFailure;

// ── Output format ───────────────────────────────────────────────────────

/// Output format for results and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or detect from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // Default: pretty for interactive terminals, JSON for pipes
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render failures in pretty (ariadne) format to stderr.
pub(crate) fn render_failures_pretty(source: &str, filename: &str, failures: &[LineFailure]) {
    if failures.is_empty() {
        return;
    }

    let config = Config::default()
        .with_compact(false)
        .with_index_type(IndexType::Byte);

    // Build the Source once (O(n) line index) and reuse across all reports.
    let mut cache = (filename, Source::from(source));

    for failure in failures {
        let start = failure.offset.min(source.len());
        let end = next_char_end(source, start);

        let mut builder = Report::build(ReportKind::Error, (filename, start..end))
            .with_code(failure.code)
            .with_message(&failure.message)
            .with_config(config)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(format!("line {}, column {}", failure.line, failure.column))
                    .with_color(Color::Red),
            );

        if let Some(explanation) = commu_core::explain(failure.code) {
            builder = builder.with_help(explanation);
        }

        builder.finish().eprint(&mut cache).ok();
    }
}

/// End of the character starting at `start`, stopping at a line break so the
/// label never spans into the next line.
fn next_char_end(source: &str, start: usize) -> usize {
    match source[start..].chars().next() {
        Some('\n' | '\r') | None => start,
        Some(c) => start + c.len_utf8(),
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary line, e.g. `2 errors in 10 lines`.
pub(crate) fn print_summary(failures: usize, total: usize) {
    use ariadne::Fmt;

    if failures == 0 {
        return;
    }
    let s = if failures == 1 { "" } else { "s" };
    let t = if total == 1 { "" } else { "s" };
    eprintln!(
        "{} in {total} line{t}",
        format!("{failures} error{s}").fg(Color::Red)
    );
}

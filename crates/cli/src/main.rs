//! `commu` — parse, check, and format commu line files.

mod lines;
mod render;

use std::fs;
use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use commu_core::{RenderConfig, emit_line};
use tracing_subscriber::EnvFilter;

use crate::lines::{LineFailure, parse_source, parse_source_line, split_lines};
use crate::render::{Format, print_summary, render_failures_pretty};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "commu",
    version,
    about = "Parse, check, and format commu stage-direction lines"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse every line of a file and print the trees.
    Parse {
        /// Input file, or `-` for stdin.
        file: String,
    },

    /// Syntax-check every line of a file.
    Check {
        /// Input file, or `-` for stdin.
        file: String,
    },

    /// Re-render every line in canonical form.
    Format {
        /// Input file, or `-` for stdin.
        file: String,
        /// Write formatted output back to the file (in-place).
        #[arg(long, short, conflicts_with = "check")]
        write: bool,
        /// Check if the file is already formatted (exit 1 if not). For CI.
        #[arg(long, conflicts_with = "write")]
        check: bool,
        /// Escape only newlines in string values, leaving `=` bare.
        #[arg(long)]
        legacy_equals: bool,
    },

    /// Explain a diagnostic ID (e.g. COMMU1001).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Parse { file } => cmd_parse(&file, format)?,
        Cmd::Check { file } => cmd_check(&file, format)?,
        Cmd::Format {
            file,
            write,
            check,
            legacy_equals,
        } => {
            let config = RenderConfig {
                escape_equals: !legacy_equals,
            };
            cmd_format(&file, write, check, &config, format)?
        }
        Cmd::Explain { id } => cmd_explain(&id, format)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let parsed = parse_source(&input);

    match format {
        Format::Json => {
            // Single valid JSON object to stdout.
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Format::Pretty => {
            // Trees to stdout, errors to stderr.
            for line in &parsed.lines {
                println!("{}", commu_core::to_pretty_json(&line.group));
            }
            render_failures_pretty(&input, file, &parsed.errors);
            print_summary(parsed.errors.len(), parsed.lines.len() + parsed.errors.len());
        }
    }

    exit_on_errors(&parsed.errors);
    Ok(())
}

fn cmd_check(file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let parsed = parse_source(&input);
    let total = parsed.lines.len() + parsed.errors.len();
    let ok = parsed.errors.is_empty();

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": ok,
                "lines": total,
                "errors": parsed.errors,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            render_failures_pretty(&input, file, &parsed.errors);
            print_summary(parsed.errors.len(), total);
            if ok {
                eprintln!("syntax ok");
            }
        }
    }

    exit_on_errors(&parsed.errors);
    Ok(())
}

fn cmd_format(
    file: &str,
    write: bool,
    check: bool,
    config: &RenderConfig,
    format: Format,
) -> Result<()> {
    if write && file == "-" {
        bail!("--write needs a file path, not stdin");
    }
    let input = read_input(file)?;

    let mut formatted = String::with_capacity(input.len());
    let mut failures = Vec::new();
    let mut non_blank = 0;
    for line in split_lines(&input) {
        if line.is_blank() {
            formatted.push_str(line.text);
        } else {
            non_blank += 1;
            match parse_source_line(&line) {
                Ok(group) => formatted.push_str(&emit_line(&group, config)),
                Err(failure) => {
                    // Unparseable lines are kept verbatim.
                    formatted.push_str(line.text);
                    failures.push(failure);
                }
            }
        }
        formatted.push_str(line.ending);
    }

    // Surface parse failures so the user knows those lines were left alone.
    if !failures.is_empty() {
        match format {
            Format::Pretty => {
                render_failures_pretty(&input, file, &failures);
                print_summary(failures.len(), non_blank);
            }
            Format::Json => {
                tracing::warn!(failed = failures.len(), "some lines could not be parsed");
            }
        }
    }

    let already_formatted = formatted == input;

    if check {
        status_message(
            format,
            already_formatted,
            "already formatted",
            "not formatted",
            file,
            &failures,
        );
        if !already_formatted {
            process::exit(1);
        }
    } else if write {
        if !already_formatted {
            fs::write(file, &formatted).with_context(|| format!("failed to write {file}"))?;
        }
        status_message(
            format,
            !already_formatted,
            "formatted",
            "already formatted",
            file,
            &failures,
        );
    } else {
        // Default: print formatted output to stdout.
        print!("{formatted}");
    }

    exit_on_errors(&failures);
    Ok(())
}

/// Emit a status message for --check / --write in the appropriate format.
fn status_message(
    format: Format,
    condition: bool,
    if_true: &str,
    if_false: &str,
    file: &str,
    failures: &[LineFailure],
) {
    let msg = if condition { if_true } else { if_false };
    match format {
        Format::Json => {
            let out = serde_json::json!({ "status": msg, "file": file, "errors": failures });
            println!(
                "{}",
                serde_json::to_string_pretty(&out).expect("status JSON serialization cannot fail")
            );
        }
        Format::Pretty => {
            eprintln!("{}: {}", msg, file);
        }
    }
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    let text = commu_core::explain(id);
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": text,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output — write to stdout, not stderr.
            if let Some(text) = text {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{}: (no explanation available)", id);
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read the whole input from a file, or from stdin when `file` is `-`.
fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        io::read_to_string(io::stdin()).context("failed to read stdin")
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
    }
}

/// Exit with code 1 if any line failed to parse.
fn exit_on_errors(failures: &[LineFailure]) {
    if !failures.is_empty() {
        io::stdout().flush().ok();
        process::exit(1);
    }
}

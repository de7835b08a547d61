//! Text renderings of event payloads. Every function returns complete lines,
//! each terminated by a newline.
//!
//! Styling is only applied when `styled` is set for the target sink, and even
//! then `colored` may still turn it off (`NO_COLOR`, `--no-color`).
use colored::*;

use crate::events::{ProgressEvent, SuccessEvent};
use crate::models::{Diagnostic, LogLevel, LogMessage};

/// Identifies this tool on stderr lines
pub const TOOL_NAME: &str = "parcel";

/// Renders a message for stdout, with no prefix
pub fn plain(message: &LogMessage) -> String {
    match message {
        LogMessage::Text(text) => format!("{}\n", text),
        LogMessage::Error(diagnostic) => {
            with_detail(diagnostic.description().to_string(), diagnostic)
        }
    }
}

/// Renders a message for stderr, prefixed with the tool name
pub fn prefixed(level: LogLevel, message: &LogMessage, styled: bool) -> String {
    match message {
        LogMessage::Text(text) => format!("{} {}\n", prefix(level, styled), text),
        LogMessage::Error(diagnostic) => diagnostic_block(level, diagnostic, styled),
    }
}

pub fn diagnostic_block(level: LogLevel, diagnostic: &Diagnostic, styled: bool) -> String {
    let first_line = format!("{} {}", prefix(level, styled), diagnostic.description());
    with_detail(first_line, diagnostic)
}

fn with_detail(first_line: String, diagnostic: &Diagnostic) -> String {
    let mut out = first_line;
    out.push('\n');
    for line in diagnostic.detail_lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn prefix(level: LogLevel, styled: bool) -> String {
    let tag = format!("{}:", TOOL_NAME);
    if !styled {
        return tag;
    }

    match level {
        LogLevel::Error => tag.as_str().red().bold().to_string(),
        LogLevel::Warn => tag.as_str().yellow().bold().to_string(),
        _ => tag,
    }
}

pub fn build_start() -> String {
    "Building...\n".to_string()
}

pub fn progress(ev: &ProgressEvent) -> String {
    match &ev.file_path {
        Some(path) => format!("{} {}...\n", ev.phase, path),
        None => format!("{}...\n", ev.phase),
    }
}

pub fn success(ev: &SuccessEvent, styled: bool) -> String {
    let line = match (ev.bundle_count, ev.build_time) {
        (Some(1), Some(ms)) => format!("Built 1 bundle in {}.", pretty_time(ms)),
        (Some(n), Some(ms)) => format!("Built {} bundles in {}.", n, pretty_time(ms)),
        (None, Some(ms)) => format!("Built in {}.", pretty_time(ms)),
        (Some(1), None) => "Built 1 bundle.".to_string(),
        (Some(n), None) => format!("Built {} bundles.", n),
        (None, None) => "Built successfully.".to_string(),
    };

    if styled {
        format!("{}\n", line.as_str().green().bold())
    } else {
        format!("{}\n", line)
    }
}

pub fn pretty_time(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.2}s", ms as f64 / 1000.0)
    }
}

/// Events are emitted by the build pipeline and handed to observers so the
/// stages of a build can be reported to the terminal.

use anyhow::{Context, Result};
use async_std::io::BufRead;
use async_std::prelude::*;
use serde::Deserialize;
use tracing::{event, instrument, Level};

use crate::models::{Diagnostic, LogLevel, LogMessage, Phase};
use crate::parser::parse_event;

/// Events that can be emitted over the course of a build
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    Log(LogEvent),
    BuildStart,
    #[serde(rename = "buildProgress")]
    Progress(ProgressEvent),
    #[serde(rename = "buildSuccess")]
    Success(SuccessEvent),
    #[serde(rename = "buildFailure")]
    Failure(FailureEvent),
    /// Any event type this reporter doesn't know about
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: LogMessage,
}

/// A build stage has started, optionally on a specific file
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub phase: Phase,
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuccessEvent {
    /// Milliseconds the build took
    pub build_time: Option<u64>,
    pub bundle_count: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FailureEvent {
    pub diagnostics: Vec<Diagnostic>,
}

impl Event {
    pub fn log(level: LogLevel, message: impl Into<LogMessage>) -> Self {
        Self::Log(LogEvent { level, message: message.into() })
    }

    #[cfg(test)]
    pub(crate) fn progress(phase: &str) -> Self {
        Self::Progress(ProgressEvent { phase: Phase::new(phase), file_path: None })
    }
}

/// Observers watch for events to occur so they can report
pub trait Observer: Send {
    fn handle(&mut self, event: Event) -> Result<()>;
}

/// Reads newline-delimited events from the reader and hands each one to the
/// observer in order. Lines that can't be decoded are skipped; only read
/// failures end the stream early.
#[instrument(skip_all)]
pub async fn pump<R: BufRead + Unpin>(reader: R, observer: &mut dyn Observer) -> Result<()> {
    let mut lines = reader.split(b'\n');
    let mut line_no = 0;

    while let Some(bytes) = lines.next().await {
        line_no += 1;
        let bytes = bytes.with_context(|| format!("Failed to read event on line {}", line_no))?;

        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                event!(Level::WARN, "Skipping line {}: {}", line_no, e);
                continue;
            }
        };

        match parse_event(&line) {
            Ok(Some(ev)) => observer.handle(ev)?,
            Ok(None) => (),
            Err(e) => {
                event!(Level::WARN, "Skipping line {}: {:#}", line_no, e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_std::io::BufReader;
    use async_std::task;

    #[derive(Default)]
    struct Collector {
        events: Vec<Event>,
    }

    impl Observer for Collector {
        fn handle(&mut self, event: Event) -> Result<()> {
            self.events.push(event);
            Ok(())
        }
    }

    #[test]
    fn test_pump_in_order() {
        let input = concat!(
            "{\"type\":\"buildStart\"}\n",
            "\n",
            "not json at all\n",
            "{\"type\":\"buildProgress\",\"phase\":\"bundling\"}\n",
            "{\"type\":\"log\",\"level\":\"info\",\"message\":\"hi\"}\n",
        );

        let mut collector = Collector::default();
        task::block_on(pump(BufReader::new(input.as_bytes()), &mut collector)).unwrap();

        let expected = vec![
            Event::BuildStart,
            Event::progress("bundling"),
            Event::log(LogLevel::Info, "hi"),
        ];
        assert_eq!(collector.events, expected);
    }

    #[test]
    fn test_pump_skips_invalid_utf8() {
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"type\":\"buildStart\"}\n");
        input.extend_from_slice(b"{\"type\":\"log\",\"level\":\"info\",\"message\":\"\xff\"}\n");
        input.extend_from_slice(b"{\"type\":\"buildProgress\",\"phase\":\"bundling\"}\r\n");

        let mut collector = Collector::default();
        task::block_on(pump(BufReader::new(&input[..]), &mut collector)).unwrap();

        assert_eq!(collector.events, vec![Event::BuildStart, Event::progress("bundling")]);
    }
}

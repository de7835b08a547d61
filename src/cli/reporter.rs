/// Reports build events to the terminal
///
/// Each event is handled on its own: the reporter decides whether the event is
/// shown at all, which stream it belongs on, and how it reads, then appends it
/// to that stream in a single write. Nothing is carried over between events,
/// and options are supplied with every call.
///
/// Log events are filtered by level against the configured threshold, with
/// errors and warnings going to stderr and everything else to stdout. Build
/// lifecycle events are never filtered.
use std::io;

use anyhow::Result;
use tracing::{event, Level};

use crate::events::{Event, LogEvent, Observer};
use crate::models::{Diagnostic, LogLevel};

pub mod render;
pub mod stdio;

use stdio::{Sinks, Stream};

/// Snapshot of the options affecting a single report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReporterOptions {
    pub log_level: Option<LogLevel>,
}

impl ReporterOptions {
    pub fn new(log_level: LogLevel) -> Self {
        Self { log_level: Some(log_level) }
    }

    /// The level filter in effect, falling back to info when unset or unknown
    pub fn threshold(&self) -> LogLevel {
        match self.log_level {
            Some(LogLevel::Unrecognized) | None => LogLevel::default(),
            Some(level) => level,
        }
    }
}

#[derive(Clone, Default)]
pub struct Reporter {
    sinks: Option<Sinks>,
}

impl Reporter {
    /// A reporter writing to whichever sinks are installed at the time of
    /// each report
    pub fn new() -> Self {
        Self { sinks: None }
    }

    /// A reporter pinned to a specific pair of sinks
    pub fn with_sinks(sinks: Sinks) -> Self {
        Self { sinks: Some(sinks) }
    }

    pub fn report(&self, event: &Event, options: &ReporterOptions) -> io::Result<()> {
        match destination(event, options) {
            Some(stream) => {
                let sinks = self.sinks();
                let text = render_event(event, sinks.styled(stream));
                sinks.write(stream, &text)
            }
            None => Ok(()),
        }
    }

    fn sinks(&self) -> Sinks {
        match &self.sinks {
            Some(sinks) => sinks.clone(),
            None => stdio::current(),
        }
    }
}

/// Decides which stream an event goes to, or `None` to drop it
pub fn destination(event: &Event, options: &ReporterOptions) -> Option<Stream> {
    match event {
        Event::Log(log) => log_destination(log, options.threshold()),
        Event::BuildStart | Event::Progress(_) | Event::Success(_) => Some(Stream::Stdout),
        Event::Failure(_) => Some(Stream::Stderr),
        Event::Unrecognized => {
            event!(Level::DEBUG, "Dropping unrecognized event");
            None
        }
    }
}

fn log_destination(log: &LogEvent, threshold: LogLevel) -> Option<Stream> {
    if !log.level.passes(threshold) {
        event!(Level::TRACE, "Filtered {} message at threshold {}", log.level, threshold);
        return None;
    }

    match log.level {
        LogLevel::Error | LogLevel::Warn => Some(Stream::Stderr),
        LogLevel::Info | LogLevel::Success | LogLevel::Verbose => Some(Stream::Stdout),
        LogLevel::Unrecognized => {
            event!(Level::DEBUG, "Dropping log event with unrecognized level");
            None
        }
    }
}

/// Renders an event which has already been routed. `styled` is whether the
/// destination sink accepts terminal styling.
fn render_event(event: &Event, styled: bool) -> String {
    match event {
        Event::Log(log) => match log.level {
            LogLevel::Error | LogLevel::Warn => render::prefixed(log.level, &log.message, styled),
            _ => render::plain(&log.message),
        },
        Event::BuildStart => render::build_start(),
        Event::Progress(progress) => render::progress(progress),
        Event::Success(success) => render::success(success, styled),
        Event::Failure(failure) if failure.diagnostics.is_empty() => {
            let fallback = Diagnostic::new("Build failed.");
            render::diagnostic_block(LogLevel::Error, &fallback, styled)
        }
        Event::Failure(failure) => failure
            .diagnostics
            .iter()
            .map(|d| render::diagnostic_block(LogLevel::Error, d, styled))
            .collect::<String>(),
        Event::Unrecognized => String::new(),
    }
}

/// Feeds events from the pipeline into a reporter, supplying the same
/// options snapshot with each one
pub struct EventLogger {
    reporter: Reporter,
    options: ReporterOptions,
}

impl EventLogger {
    pub fn new(reporter: Reporter, options: ReporterOptions) -> Self {
        Self { reporter, options }
    }

    /// Reports a fatal error from the host as an error log event
    pub fn report_error(&self, err: &anyhow::Error) -> Result<()> {
        let ev = Event::log(LogLevel::Error, Diagnostic::from_error(err));
        self.reporter.report(&ev, &self.options)?;
        Ok(())
    }
}

impl Observer for EventLogger {
    fn handle(&mut self, event: Event) -> Result<()> {
        self.reporter.report(&event, &self.options)?;
        Ok(())
    }
}

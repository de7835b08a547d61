//! Process-wide pair of output sinks the reporter writes to.
//!
//! By default these are the real stdout and stderr of the process. A host or
//! test harness can install its own pair with [`set`] and go back to the
//! process streams with [`reset`]. Swaps take effect on the next write.
//!
//! Each stream also records whether it may receive terminal styling. Only the
//! process streams opt in, and only when that stream is itself a terminal.
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

pub type SharedWrite = Arc<Mutex<dyn Write + Send>>;

/// Role of a sink
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Clone)]
pub struct Sinks {
    out: SharedWrite,
    err: SharedWrite,
    out_styled: bool,
    err_styled: bool,
}

impl Sinks {
    /// Sinks which always receive plain text
    pub fn new(out: impl Write + Send + 'static, err: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            err: Arc::new(Mutex::new(err)),
            out_styled: false,
            err_styled: false,
        }
    }

    /// The real stdout and stderr of the process
    pub fn process() -> Self {
        Self {
            out_styled: io::stdout().is_terminal(),
            err_styled: io::stderr().is_terminal(),
            ..Self::new(io::stdout(), io::stderr())
        }
    }

    /// Whether text bound for this stream may carry terminal styling
    pub fn styled(&self, stream: Stream) -> bool {
        match stream {
            Stream::Stdout => self.out_styled,
            Stream::Stderr => self.err_styled,
        }
    }

    /// Appends text to one sink as a single write
    pub fn write(&self, stream: Stream, text: &str) -> io::Result<()> {
        let sink = match stream {
            Stream::Stdout => &self.out,
            Stream::Stderr => &self.err,
        };

        let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(text.as_bytes())?;
        sink.flush()
    }

    #[cfg(test)]
    fn same_as(&self, other: &Sinks) -> bool {
        Arc::ptr_eq(&self.out, &other.out) && Arc::ptr_eq(&self.err, &other.err)
    }
}

static INSTALLED: RwLock<Option<Sinks>> = RwLock::new(None);

/// Installs a pair of sinks, returning whatever pair was installed before
pub fn set(sinks: Sinks) -> Option<Sinks> {
    let mut installed = INSTALLED.write().unwrap_or_else(PoisonError::into_inner);
    installed.replace(sinks)
}

/// Drops any installed sinks so writes go back to the process streams
pub fn reset() -> Option<Sinks> {
    let mut installed = INSTALLED.write().unwrap_or_else(PoisonError::into_inner);
    installed.take()
}

/// The sinks writes should currently go to
pub fn current() -> Sinks {
    let installed = INSTALLED.read().unwrap_or_else(PoisonError::into_inner);
    match &*installed {
        Some(sinks) => sinks.clone(),
        None => Sinks::process(),
    }
}

/// In-memory sink which can be read back, for capturing output
#[derive(Clone, Default)]
pub struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).to_string()
    }
}

impl Write for Capture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

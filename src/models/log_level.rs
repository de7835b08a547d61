//! Verbosity classification attached to log events
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Levels are ordered from least to most verbose. `Unrecognized` stands in for
/// any level name an upstream producer sends that we don't know about yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Success,
    Verbose,
    Unrecognized,
}

impl LogLevel {
    /// Position on the verbosity scale, `None` for unrecognized levels
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            Self::Error => Some(0),
            Self::Warn => Some(1),
            Self::Info => Some(2),
            Self::Success => Some(3),
            Self::Verbose => Some(4),
            Self::Unrecognized => None,
        }
    }

    /// Whether an event at this level passes the given threshold
    pub fn passes(&self, threshold: LogLevel) -> bool {
        match (self.ordinal(), threshold.ordinal()) {
            (Some(level), Some(threshold)) => level <= threshold,
            _ => false,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(input: &str) -> Result<LogLevel, Self::Err> {
        match input {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "verbose" => Ok(Self::Verbose),
            _ => Err(()),
        }
    }
}

impl From<String> for LogLevel {
    fn from(input: String) -> Self {
        input.parse().unwrap_or(Self::Unrecognized)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Verbose => write!(f, "verbose"),
            Self::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Error.passes(LogLevel::Info));
        assert!(LogLevel::Warn.passes(LogLevel::Info));
        assert!(LogLevel::Info.passes(LogLevel::Info));
        assert!(!LogLevel::Success.passes(LogLevel::Info));
        assert!(!LogLevel::Verbose.passes(LogLevel::Info));

        assert!(LogLevel::Success.passes(LogLevel::Success));
        assert!(!LogLevel::Verbose.passes(LogLevel::Success));
        assert!(LogLevel::Verbose.passes(LogLevel::Verbose));

        assert!(LogLevel::Error.passes(LogLevel::Error));
        assert!(!LogLevel::Warn.passes(LogLevel::Error));
    }

    #[test]
    fn test_unrecognized_never_passes() {
        assert!(!LogLevel::Unrecognized.passes(LogLevel::Verbose));
        assert!(!LogLevel::Error.passes(LogLevel::Unrecognized));
    }

    #[test]
    fn test_from_string() {
        assert_eq!(LogLevel::from("warn".to_string()), LogLevel::Warn);
        assert_eq!(LogLevel::from("chatty".to_string()), LogLevel::Unrecognized);
        assert_eq!("success".parse::<LogLevel>(), Ok(LogLevel::Success));
        assert_eq!("Info".parse::<LogLevel>(), Err(()));
    }
}

//! Data models for the values carried by build events

pub mod log_level;
pub mod message;
pub mod phase;

pub use log_level::LogLevel;
pub use message::{Diagnostic, LogMessage};
pub use phase::Phase;

//! Terminal reporter for build lifecycle events

pub mod cli;
pub mod events;
pub mod models;
pub mod parser;

pub use cli::reporter::stdio;
pub use cli::{Reporter, ReporterOptions};
pub use events::{Event, Observer};

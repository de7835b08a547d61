//! Provides parsing and validation of command line arguments into
//! options required by the reporter

use anyhow::{anyhow, Result};
use clap::{Arg, Command};
use async_std::path::PathBuf;

use crate::models::LogLevel;

pub mod reporter;

pub use reporter::{EventLogger, Reporter, ReporterOptions};

const LOG_LEVEL_ENV: &str = "PARCEL_LOG_LEVEL";

pub struct CLI {
    matches: clap::ArgMatches,
}

/// Where events are read from
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl CLI {
    pub fn init() -> Result<CLI> {
        let matches = get_cli_definition().get_matches();
        Ok(CLI { matches })
    }

    pub fn from_args<I, T>(args: I) -> Result<CLI>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = get_cli_definition().try_get_matches_from(args)?;
        Ok(CLI { matches })
    }

    pub fn get_reporter_options(&self) -> Result<ReporterOptions> {
        let log_level = self.get_log_level(std::env::var(LOG_LEVEL_ENV).ok())?;
        Ok(ReporterOptions { log_level })
    }

    /// Flags win over the environment. An unknown level in the environment is
    /// passed through and ends up treated as the default.
    fn get_log_level(&self, env_level: Option<String>) -> Result<Option<LogLevel>> {
        let verbose = self.matches.get_flag("verbose");
        let quiet = self.matches.get_flag("quiet");
        let explicit = self.matches.get_one::<String>("log_level");

        if (verbose as usize + quiet as usize + explicit.is_some() as usize) > 1 {
            return Err(anyhow!(
                "Only one of --log-level, --verbose, or --quiet can be used at a time"
            ));
        }

        if verbose {
            Ok(Some(LogLevel::Verbose))
        } else if quiet {
            Ok(Some(LogLevel::Error))
        } else if let Some(level) = explicit {
            Ok(Some(LogLevel::from(level.clone())))
        } else {
            Ok(env_level.map(LogLevel::from))
        }
    }

    pub fn get_input(&self) -> Input {
        match self.matches.get_one::<String>("input") {
            Some(path) if path != "-" => Input::File(PathBuf::from(path.clone())),
            _ => Input::Stdin,
        }
    }

    /// Process streams are only styled when they are terminals; this forces
    /// styling off for them too
    pub fn apply_color_choice(&self) {
        if self.matches.get_flag("no_color") {
            colored::control::set_override(false);
        }
    }
}

fn get_cli_definition() -> Command {
    Command::new("parcel-report")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders a stream of build events as terminal output")
        .arg(
            Arg::new("input")
                .help("File of newline-delimited JSON events, or - for stdin")
                .index(1),
        )
        .arg(
            Arg::new("log_level")
                .help("Most verbose level of log messages to show")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(["error", "warn", "info", "success", "verbose"])
                .num_args(1),
        )
        .arg(
            Arg::new("verbose")
                .help("Show all log messages")
                .action(clap::ArgAction::SetTrue)
                .short('v')
                .long("verbose"),
        )
        .arg(
            Arg::new("quiet")
                .help("Only show errors")
                .action(clap::ArgAction::SetTrue)
                .short('q')
                .long("quiet"),
        )
        .arg(
            Arg::new("no_color")
                .help("Disable colored output")
                .action(clap::ArgAction::SetTrue)
                .long("no-color"),
        )
}

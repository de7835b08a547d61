use anyhow::{Context, Result};
use async_std::fs::File;
use async_std::io::{self, BufReader};
use async_std::task;
use tracing_subscriber::{prelude::*, registry::Registry, EnvFilter};
use tracing_tree::HierarchicalLayer;

use parcel_reporter::cli::{EventLogger, Input, CLI};
use parcel_reporter::events::pump;
use parcel_reporter::{Reporter, ReporterOptions};

fn main() -> Result<()> {
    task::block_on(run())
}

async fn run() -> Result<()> {
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(HierarchicalLayer::new(2));
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = CLI::init()?;
    cli.apply_color_choice();

    let options = match cli.get_reporter_options() {
        Ok(options) => options,
        Err(e) => fail(&EventLogger::new(Reporter::new(), ReporterOptions::default()), e)?,
    };
    let mut logger = EventLogger::new(Reporter::new(), options);

    match read_events(cli.get_input(), &mut logger).await {
        Ok(()) => Ok(()),
        Err(e) => fail(&logger, e),
    }
}

async fn read_events(input: Input, logger: &mut EventLogger) -> Result<()> {
    match input {
        Input::Stdin => pump(BufReader::new(io::stdin()), logger).await,
        Input::File(path) => {
            let file = File::open(&path)
                .await
                .with_context(|| format!("Failed to open event file {}", path.display()))?;
            pump(BufReader::new(file), logger).await
        }
    }
}

/// Reports a fatal error through the reporter and exits
fn fail<T>(logger: &EventLogger, err: anyhow::Error) -> Result<T> {
    logger.report_error(&err)?;
    std::process::exit(1)
}

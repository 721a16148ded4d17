//! Wheelshow host console entry point.

use std::error::Error;

use tokio::io::{BufReader, stdin};
use tracing_subscriber::EnvFilter;
use wheelshow_console::config::ConsoleConfig;
use wheelshow_console::runner::run;
use wheelshow_console::state::Console;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr; stdout carries the event stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!("Starting Wheelshow host console");

    let config = ConsoleConfig::from_env()?;
    let mut console = Console::from_config(&config)?;

    let mut stdout = std::io::stdout();
    run(&mut console, BufReader::new(stdin()), &mut stdout).await?;

    Ok(())
}

//! Formic CLI - Main Entry Point
//!
//! Terminal stand-in for the widget layer: routes typed input to field
//! paths and renders the error map beside each field.

mod session;

use std::error::Error;

use session::Session;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("starting formic session");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new();
    session.run(stdin.lock(), stdout.lock())?;

    Ok(())
}

//! Shader Forge Application Library
//!
//! Command line configuration, logging, progress reporting and output
//! for the `shader-forge` binary.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod setup;

pub use config::AppConfig;
pub use error::AppError;

use anyhow::Result;
use clap::Parser;

/// Parses the command line, sets up logging and runs the selected mode.
pub fn main() -> Result<()> {
    let config = AppConfig::parse();
    logging::init_logger(&config);

    log::info!("Shader Forge starting");
    log::debug!("Loaded Config: {:?}", config);

    setup::execution::run(&config)?;

    log::info!("Shader Forge finished.");
    Ok(())
}

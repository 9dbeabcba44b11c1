//! Nebula Editor CLI
//!
//! Submits a video to the Nebula processing service and saves the result.
//!
//! # Usage
//!
//! ```bash
//! nebula process --input clip.mp4 --quality high --format 9x16 --enhance denoise
//! nebula options --json
//! nebula config --write nebula.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use nebula_editor::adapters::init_logging;
use nebula_editor::cli::{commands, Cli, Commands};
use nebula_editor::config_initialization::initialize_configuration;
use nebula_editor::ports::LogLevel;

/// Main entry point for the Nebula Editor CLI
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration(&cli)?;
    let level = LogLevel::parse(&config.log_level)?;
    init_logging(level, cli.json_logs);

    info!("Starting Nebula Editor");

    match cli.command {
        Commands::Process(args) => {
            info!("Executing process command");
            let state = commands::process(args, &config).await?;
            info!("Process command finished in state {}", state);
        }
        Commands::Options(args) => commands::options(args)?,
        Commands::Config(args) => commands::config(args, &config)?,
    }

    Ok(())
}

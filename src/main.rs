//! vidgate - video validation and transcoding gateway
//!
//! # Usage
//!
//! ```bash
//! vidgate info story.mp4
//! vidgate validate story.mp4 --max-duration 60
//! vidgate compress in.mov out.mp4 --quality high
//! vidgate thumbnail in.mp4 thumb.jpg --timestamp 00:00:03
//! vidgate convert in.mp4 out.webm --format webm
//! vidgate doctor
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};

use vidgate::app::DefaultAppContainer;
use vidgate::cli::{commands, Cli, Commands};
use vidgate::config_initialization::initialize_configuration_hierarchy;
use vidgate::utils::logging::{init_logging, LogLevel};

/// Main entry point for the vidgate CLI application
#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli.global)?;
    init_logging(LogLevel::parse(&config.logging.level)?, config.logging.format);
    debug!("Resolved configuration: {:?}", config);

    let container =
        DefaultAppContainer::new(config).context("Failed to initialize application")?;
    let format = cli.global.output;

    // Execute the requested command
    let success = match cli.command {
        Commands::Info(args) => commands::info(&container, args, format).await?,
        Commands::Compress(args) => commands::compress(&container, args, format).await?,
        Commands::Thumbnail(args) => commands::thumbnail(&container, args, format).await?,
        Commands::Convert(args) => commands::convert(&container, args, format).await?,
        Commands::Validate(args) => commands::validate(&container, args, format).await?,
        Commands::Duration(args) => commands::duration(&container, args, format).await?,
        Commands::Doctor => commands::doctor(&container, format).await?,
    };

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        info!("Command finished with a failed outcome");
        Ok(ExitCode::FAILURE)
    }
}

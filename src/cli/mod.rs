//! CLI module for vidgate
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{
    CompressArgs, ConvertArgs, DurationArgs, GlobalArgs, InfoArgs, OutputFormat, ThumbnailArgs,
    ValidateArgs,
};

/// vidgate - video validation and transcoding gateway
///
/// Probes, validates and re-encodes videos through ffmpeg, preferring the
/// native duration validator when it is installed.
#[derive(Parser, Debug)]
#[command(name = "vidgate")]
#[command(about = "Video validation and transcoding gateway")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show metadata of the first video stream
    Info(InfoArgs),
    /// Re-encode with a quality preset
    Compress(CompressArgs),
    /// Extract a single frame as an image
    Thumbnail(ThumbnailArgs),
    /// Convert to another container family
    Convert(ConvertArgs),
    /// Check a video against the story length limit
    Validate(ValidateArgs),
    /// Print the video duration
    Duration(DurationArgs),
    /// Report tool availability and native validator status
    Doctor,
}

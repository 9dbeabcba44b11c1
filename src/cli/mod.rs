//! CLI module for Nebula Editor
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// Nebula Editor
///
/// Uploads a video to the Nebula processing service with the chosen quality,
/// aspect-ratio format and enhancements, then fetches the processed result.
#[derive(Parser, Debug)]
#[command(name = "nebula")]
#[command(about = "Nebula Editor - Submit videos for processing and fetch the result")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (default: nebula.toml, then config/nebula.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a video for processing
    Process(args::ProcessArgs),
    /// List available qualities, formats and enhancements
    Options(args::OptionsArgs),
    /// Show or write the effective configuration
    Config(args::ConfigArgs),
}

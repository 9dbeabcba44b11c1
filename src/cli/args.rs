//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::model::{AspectFormat, Enhancement, Quality};

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output quality (lossless, high, balanced, compact)
    #[arg(short, long, value_parser = parse_quality)]
    pub quality: Option<Quality>,

    /// Target aspect ratio (1x1, 9x16, 16x9, 4x5, 1x2, 2x1, 21x9)
    #[arg(short, long, value_parser = parse_format)]
    pub format: Option<AspectFormat>,

    /// Enhancement to enable; repeat for several
    #[arg(short, long = "enhance", value_parser = parse_enhancement)]
    pub enhance: Vec<Enhancement>,

    /// Processing endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Directory the processed video is written to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not download the processed video
    #[arg(long)]
    pub no_download: bool,
}

/// Arguments for the options command
#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the effective configuration to this path
    #[arg(long)]
    pub write: Option<PathBuf>,
}

fn parse_quality(value: &str) -> Result<Quality, String> {
    Quality::parse(value).map_err(|e| e.to_string())
}

fn parse_format(value: &str) -> Result<AspectFormat, String> {
    AspectFormat::parse(value).map_err(|e| e.to_string())
}

fn parse_enhancement(value: &str) -> Result<Enhancement, String> {
    Enhancement::parse(value).map_err(|e| e.to_string())
}

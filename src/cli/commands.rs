//! Command implementations

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::adapters::{probe_video_file, ClientConfig, TomlConfigAdapter};
use crate::app::{DefaultAppContainer, UserIntent};
use crate::cli::args::{ConfigArgs, OptionsArgs, ProcessArgs};
use crate::domain::model::{AspectFormat, Enhancement, Quality, WorkflowState};
use crate::domain::rules::format_file_size;
use crate::error::NebulaResult;

/// Execute the process command.
///
/// Drives one session through the workflow and, unless disabled, saves the
/// processed video into the output directory.
pub async fn process(args: ProcessArgs, config: &ClientConfig) -> Result<WorkflowState> {
    info!("Starting process operation");
    info!("Input: {}", args.input.display());
    info!("Endpoint: {}", config.endpoint);

    let container = DefaultAppContainer::new(config).context("Failed to set up client")?;
    let presenter = container.presenter();
    let mut controller = container.workflow_controller();

    let file = probe_video_file(&args.input)
        .await
        .with_context(|| format!("Failed to read input file {}", args.input.display()))?;
    controller.dispatch(UserIntent::FileIntake(Some(file))).await?;
    if controller.state() != WorkflowState::Configure {
        let reason = presenter
            .active_notice()
            .unwrap_or_else(|| "file was not accepted".to_string());
        return Err(anyhow::anyhow!("Input rejected: {}", reason));
    }

    if let Some(quality) = args.quality {
        controller.dispatch(UserIntent::SelectQuality(quality)).await?;
    }
    if let Some(format) = args.format {
        controller.dispatch(UserIntent::SelectFormat(format)).await?;
    }
    // Repeating a flag must not toggle the enhancement back off.
    let enhancements: BTreeSet<Enhancement> = args.enhance.into_iter().collect();
    for enhancement in enhancements {
        controller
            .dispatch(UserIntent::ToggleEnhancement(enhancement))
            .await?;
    }

    controller.dispatch(UserIntent::Submit).await?;
    if controller.state() != WorkflowState::Result {
        let reason = presenter
            .active_notice()
            .unwrap_or_else(|| "processing did not complete".to_string());
        return Err(anyhow::anyhow!("{}", reason));
    }

    if args.no_download {
        info!("Skipping download");
        return Ok(controller.state());
    }

    controller.dispatch(UserIntent::Download).await?;
    let Some(offer) = presenter.download_offer() else {
        warn!("No download was offered");
        return Ok(controller.state());
    };

    let destination = config.output_dir.join(&offer.suggested_name);
    let written = save_artifact(&container, &offer.url, &destination)
        .await
        .context("Failed to download processed video")?;

    info!(
        "Saved {} ({})",
        destination.display(),
        format_file_size(written)
    );
    println!("Saved {}", destination.display());
    Ok(controller.state())
}

/// Fetch the processed video into `destination`, creating its directory
async fn save_artifact(
    container: &DefaultAppContainer,
    download_url: &str,
    destination: &Path,
) -> NebulaResult<u64> {
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let written = container
        .transfer()
        .fetch_artifact(download_url, destination)
        .await?;
    Ok(written)
}

#[derive(Serialize)]
struct FormatOption {
    key: &'static str,
    name: &'static str,
}

#[derive(Serialize)]
struct OptionsListing {
    qualities: Vec<Quality>,
    formats: Vec<FormatOption>,
    enhancements: Vec<Enhancement>,
}

fn options_listing() -> OptionsListing {
    OptionsListing {
        qualities: Quality::ALL.to_vec(),
        formats: AspectFormat::ALL
            .iter()
            .map(|format| FormatOption {
                key: format.key(),
                name: format.display_name(),
            })
            .collect(),
        enhancements: Enhancement::ALL.to_vec(),
    }
}

/// Execute the options command
pub fn options(args: OptionsArgs) -> Result<()> {
    let listing = options_listing();

    if args.json {
        let json = serde_json::to_string_pretty(&listing).context("Failed to encode options")?;
        println!("{}", json);
        return Ok(());
    }

    println!("Qualities:");
    for quality in &listing.qualities {
        let marker = if *quality == Quality::default() { " (default)" } else { "" };
        println!("  {}{}", quality, marker);
    }
    println!("Formats:");
    for format in &listing.formats {
        println!("  {:<5} {}", format.key, format.name);
    }
    println!("Enhancements:");
    for enhancement in &listing.enhancements {
        println!("  {}", enhancement);
    }
    Ok(())
}

/// Execute the config command
pub fn config(args: ConfigArgs, config: &ClientConfig) -> Result<()> {
    if let Some(path) = args.write {
        TomlConfigAdapter::save_file(config, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    print!("{}", TomlConfigAdapter::serialize(config)?);
    Ok(())
}

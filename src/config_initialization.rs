//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};

use crate::adapters::{ClientConfig, ConfigOverrides, TomlConfigAdapter};
use crate::cli::{Cli, Commands};

/// Build the client configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> Result<ClientConfig> {
    let mut config = TomlConfigAdapter::discover(cli.config.as_deref())
        .context("Failed to load configuration file")?;

    TomlConfigAdapter::apply_env(&mut config, |key| std::env::var(key).ok())
        .context("Invalid environment override")?;

    TomlConfigAdapter::apply_overrides(&mut config, &cli_overrides(cli));

    TomlConfigAdapter::validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Collect the settings given explicitly on the command line
pub fn cli_overrides(cli: &Cli) -> ConfigOverrides {
    let mut overrides = ConfigOverrides {
        log_level: cli.log_level.clone(),
        ..ConfigOverrides::default()
    };

    if let Commands::Process(args) = &cli.command {
        overrides.endpoint = args.endpoint.clone();
        overrides.output_dir = args.output.clone();
    }

    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_process_flags_become_overrides() {
        let cli = Cli::parse_from([
            "nebula",
            "--log-level",
            "debug",
            "process",
            "--input",
            "clip.mp4",
            "--endpoint",
            "http://cli.local/process",
            "--output",
            "renders",
        ]);
        let overrides = cli_overrides(&cli);
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert_eq!(overrides.endpoint.as_deref(), Some("http://cli.local/process"));
        assert_eq!(overrides.output_dir, Some(std::path::PathBuf::from("renders")));
    }

    #[test]
    fn test_options_command_has_no_endpoint_override() {
        let cli = Cli::parse_from(["nebula", "options"]);
        let overrides = cli_overrides(&cli);
        assert!(overrides.endpoint.is_none());
        assert!(overrides.log_level.is_none());
    }

    #[test]
    fn test_explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nebula.toml");
        std::fs::write(&path, "[nebula]\nnotice_duration_secs = 9\n").unwrap();

        let cli = Cli::parse_from(["nebula", "--config", path.to_str().unwrap(), "options"]);
        let config = initialize_configuration(&cli).unwrap();
        assert_eq!(config.notice_duration_secs, 9);
    }
}

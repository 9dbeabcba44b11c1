// TOML config adapter - Client configuration from defaults, file, environment and CLI

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::ports::LogLevel;

/// Default processing endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/process";

/// Config files tried in order when no path is given
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["nebula.toml", "config/nebula.toml"];

/// Environment variables and the setting each one overrides
pub const ENV_MAPPINGS: [(&str, &str); 6] = [
    ("NEBULA_ENDPOINT", "endpoint"),
    ("NEBULA_CONNECT_TIMEOUT", "connect_timeout_secs"),
    ("NEBULA_USER_AGENT", "user_agent"),
    ("NEBULA_NOTICE_DURATION", "notice_duration_secs"),
    ("NEBULA_OUTPUT_DIR", "output_dir"),
    ("NEBULA_LOG_LEVEL", "log_level"),
];

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Bounds connection setup only
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    pub notice_duration_secs: u64,
    pub output_dir: PathBuf,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: 10,
            user_agent: format!("nebula-editor/{}", env!("CARGO_PKG_VERSION")),
            notice_duration_secs: 5,
            output_dir: PathBuf::from("."),
            log_level: "info".to_string(),
        }
    }
}

/// On-disk layout: everything lives under a `[nebula]` table
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    nebula: ClientConfig,
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn parse(toml_content: &str) -> Result<ClientConfig, DomainError> {
        let parsed: ConfigFile = toml::from_str(toml_content)
            .map_err(|e| DomainError::ConfigFail(format!("Failed to parse TOML config: {}", e)))?;
        Ok(parsed.nebula)
    }

    /// Serialize to the same layout `parse` reads
    pub fn serialize(config: &ClientConfig) -> Result<String, DomainError> {
        let file = ConfigFile {
            nebula: config.clone(),
        };
        toml::to_string(&file)
            .map_err(|e| DomainError::ConfigFail(format!("Failed to encode config: {}", e)))
    }

    pub fn load_file(path: &Path) -> Result<ClientConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::FsFail(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn save_file(config: &ClientConfig, path: &Path) -> Result<(), DomainError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::FsFail(format!("Failed to create config directory: {}", e))
            })?;
        }
        let content = Self::serialize(config)?;
        std::fs::write(path, content)
            .map_err(|e| DomainError::FsFail(format!("Failed to write config file: {}", e)))
    }

    /// Load an explicit file, or the first default path that exists, or defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<ClientConfig, DomainError> {
        if let Some(path) = explicit {
            info!("Loading configuration from: {}", path.display());
            return Self::load_file(path);
        }

        for candidate in DEFAULT_CONFIG_PATHS {
            let path = Path::new(candidate);
            if path.exists() {
                info!("Loading configuration from: {}", candidate);
                return Self::load_file(path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(ClientConfig::default())
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env<F>(config: &mut ClientConfig, lookup: F) -> Result<usize, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;
        for (env_var, key) in ENV_MAPPINGS {
            let Some(value) = lookup(env_var) else {
                continue;
            };
            info!("Found environment override: {} = {}", env_var, value);
            Self::set(config, key, &value)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Apply command-line overrides; these win over everything else
    pub fn apply_overrides(config: &mut ClientConfig, overrides: &ConfigOverrides) -> usize {
        let mut applied = 0;
        if let Some(endpoint) = &overrides.endpoint {
            info!("CLI override: endpoint = {}", endpoint);
            config.endpoint = endpoint.clone();
            applied += 1;
        }
        if let Some(output_dir) = &overrides.output_dir {
            info!("CLI override: output_dir = {}", output_dir.display());
            config.output_dir = output_dir.clone();
            applied += 1;
        }
        if let Some(log_level) = &overrides.log_level {
            config.log_level = log_level.clone();
            applied += 1;
        }
        applied
    }

    /// Set a single key from its string form
    pub fn set(config: &mut ClientConfig, key: &str, value: &str) -> Result<(), DomainError> {
        match key {
            "endpoint" => config.endpoint = value.to_string(),
            "connect_timeout_secs" => config.connect_timeout_secs = parse_secs(key, value)?,
            "user_agent" => config.user_agent = value.to_string(),
            "notice_duration_secs" => config.notice_duration_secs = parse_secs(key, value)?,
            "output_dir" => config.output_dir = PathBuf::from(value),
            "log_level" => config.log_level = value.to_string(),
            _ => {
                return Err(DomainError::ConfigFail(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(config: &ClientConfig) -> Result<(), DomainError> {
        let endpoint = config.endpoint.trim();
        if endpoint.is_empty() {
            return Err(DomainError::ConfigFail("Endpoint cannot be empty".to_string()));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(DomainError::ConfigFail(format!(
                "Endpoint must be an http(s) URL: {}",
                endpoint
            )));
        }
        if config.notice_duration_secs == 0 {
            return Err(DomainError::ConfigFail(
                "Notice duration must be at least one second".to_string(),
            ));
        }
        LogLevel::parse(&config.log_level)
            .map_err(|e| DomainError::ConfigFail(e.to_string()))?;
        Ok(())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64, DomainError> {
    value
        .trim()
        .parse()
        .map_err(|e| DomainError::ConfigFail(format!("Invalid value for {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.notice_duration_secs, 5);
        assert!(config.user_agent.starts_with("nebula-editor/"));
        assert!(TomlConfigAdapter::validate(&config).is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TomlConfigAdapter::parse(
            r#"
            [nebula]
            endpoint = "https://render.example.com/process"
            notice_duration_secs = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint, "https://render.example.com/process");
        assert_eq!(config.notice_duration_secs, 8);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        let err = TomlConfigAdapter::parse("[nebula]\nnotice_duration_secs = \"soon\"\n");
        assert!(matches!(err, Err(DomainError::ConfigFail(_))));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut config = ClientConfig::default();
        config.output_dir = PathBuf::from("renders");
        let text = TomlConfigAdapter::serialize(&config).unwrap();
        assert!(text.starts_with("[nebula]"));
        assert_eq!(TomlConfigAdapter::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_env_then_cli_precedence() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("NEBULA_ENDPOINT", "http://env.local/process"),
            ("NEBULA_LOG_LEVEL", "debug"),
            ("NEBULA_NOTICE_DURATION", "7"),
        ]);
        let mut config = ClientConfig::default();
        let applied =
            TomlConfigAdapter::apply_env(&mut config, |key| env.get(key).map(|v| v.to_string()))
                .unwrap();
        assert_eq!(applied, 3);
        assert_eq!(config.endpoint, "http://env.local/process");
        assert_eq!(config.notice_duration_secs, 7);

        let overrides = ConfigOverrides {
            endpoint: Some("http://cli.local/process".to_string()),
            ..ConfigOverrides::default()
        };
        assert_eq!(TomlConfigAdapter::apply_overrides(&mut config, &overrides), 1);
        assert_eq!(config.endpoint, "http://cli.local/process");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_env_rejects_bad_number() {
        let mut config = ClientConfig::default();
        let result = TomlConfigAdapter::apply_env(&mut config, |key| {
            (key == "NEBULA_CONNECT_TIMEOUT").then(|| "ten".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = ClientConfig::default();
        config.endpoint = "ftp://files.local".to_string();
        assert!(TomlConfigAdapter::validate(&config).is_err());

        let mut config = ClientConfig::default();
        config.notice_duration_secs = 0;
        assert!(TomlConfigAdapter::validate(&config).is_err());

        let mut config = ClientConfig::default();
        config.log_level = "loud".to_string();
        assert!(TomlConfigAdapter::validate(&config).is_err());
    }

    #[test]
    fn test_save_and_discover_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("nebula.toml");
        let mut config = ClientConfig::default();
        config.endpoint = "http://saved.local/process".to_string();

        TomlConfigAdapter::save_file(&config, &path).unwrap();
        assert_eq!(TomlConfigAdapter::discover(Some(&path)).unwrap(), config);

        let missing = dir.path().join("missing.toml");
        assert!(TomlConfigAdapter::discover(Some(&missing)).is_err());
    }
}

// Adapters - External system implementations

pub mod http_reqwest;
pub mod presenter_terminal;
pub mod probe_infer;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use http_reqwest::HttpTransferAdapter;
pub use presenter_terminal::TerminalPresenter;
pub use probe_infer::probe_video_file;
pub use toml_config::{ClientConfig, ConfigOverrides, TomlConfigAdapter};
pub use tracing_log::init_logging;

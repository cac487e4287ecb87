//! Configuration file loading for datawizard
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `TOGETHER_API_KEY`, `GROQ_API_KEY`, `DATAWIZARD_*`
//! 2. `--config <path>` specified file
//! 3. Project root: `./datawizard.toml` or `./.datawizard.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/datawizard/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileConfig, FileLoggingConfig, FileReplConfig,
    FileServiceConfig, ServiceEndpoint,
};
pub use loader::{ConfigLayer, ConfigLoader};

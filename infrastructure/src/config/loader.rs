//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["datawizard.toml", ".datawizard.toml"];

/// Provider API keys read from the environment, and where they land.
const CREDENTIAL_VARS: [(&str, &str); 2] = [
    ("TOGETHER_API_KEY", "classifier.api_key"),
    ("GROQ_API_KEY", "answer.api_key"),
];

/// A TOML file that may take part in the merged configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub label: &'static str,
    pub path: PathBuf,
}

/// Layered configuration: built-in defaults, then TOML files, then the
/// environment. Later layers override earlier ones key by key.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Merge every source that exists.
    ///
    /// File order is global (`<config dir>/datawizard/config.toml`), then
    /// project (`./datawizard.toml` or `./.datawizard.toml`), then the
    /// `--config` path. `DATAWIZARD_*` variables and the provider API keys
    /// are applied last.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let figment = Self::file_layers(config_path)
            .into_iter()
            .filter(|layer| layer.path.exists())
            .fold(Self::defaults(), |figment, layer| {
                figment.merge(Toml::file(layer.path))
            });
        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Defaults plus one file, ignoring the environment. Used by tests and
    /// for checking a single file in isolation.
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Self::defaults()
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Defaults plus the environment, for `--no-config`.
    pub fn load_defaults() -> FileConfig {
        Self::with_env(Self::defaults())
            .extract()
            .unwrap_or_default()
    }

    /// Candidate files in merge order, whether or not they exist.
    pub fn file_layers(explicit: Option<&PathBuf>) -> Vec<ConfigLayer> {
        let mut layers = Vec::new();
        if let Some(path) = Self::global_config_path() {
            layers.push(ConfigLayer { label: "global", path });
        }
        let project = Self::project_config_path().unwrap_or_else(|| PathBuf::from(PROJECT_FILES[0]));
        layers.push(ConfigLayer {
            label: "project",
            path: project,
        });
        if let Some(path) = explicit {
            layers.push(ConfigLayer {
                label: "explicit",
                path: path.clone(),
            });
        }
        layers
    }

    fn defaults() -> Figment {
        Figment::new().merge(Serialized::defaults(FileConfig::default()))
    }

    fn with_env(figment: Figment) -> Figment {
        CREDENTIAL_VARS
            .into_iter()
            .fold(figment, |figment, (var, key)| {
                figment.merge(Env::raw().only(&[var]).map(move |_| key.into()))
            })
            .merge(Env::prefixed("DATAWIZARD_").split("__"))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("datawizard").join("config.toml"))
    }

    /// First project file present in the working directory.
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// List each source, highest priority first, for `--show-config`.
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("DataWizard configuration, highest priority first:");
        for (var, _) in CREDENTIAL_VARS {
            let set = std::env::var(var).is_ok_and(|v| !v.is_empty());
            println!("  {} env      {}", mark(set), var);
        }
        for layer in Self::file_layers(explicit).iter().rev() {
            println!(
                "  {} {:<8} {}",
                mark(layer.path.exists()),
                layer.label,
                layer.path.display()
            );
        }
        println!("  {} defaults", mark(true));
    }
}

fn mark(present: bool) -> &'static str {
    if present { "[x]" } else { "[ ]" }
}

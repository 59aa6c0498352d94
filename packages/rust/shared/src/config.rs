//! Application configuration for Curricula.
//!
//! User config lives at `~/.curricula/curricula.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CurriculaError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "curricula.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".curricula";

// ---------------------------------------------------------------------------
// Config structs (matching curricula.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Registered curriculum source directories.
    #[serde(default)]
    pub directories: Vec<DirectoryEntry>,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default artifact output directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Extension of the rendered-text documents to process.
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            source_extension: default_source_extension(),
        }
    }
}

fn default_output_dir() -> String {
    "curricula-out".into()
}
fn default_source_extension() -> String {
    "txt".into()
}

/// `[[directories]]` entry — a registered source directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Human-readable name.
    pub name: String,
    /// Path to the directory of rendered document text files.
    pub path: String,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.curricula/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CurriculaError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.curricula/curricula.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CurriculaError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| CurriculaError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CurriculaError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CurriculaError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CurriculaError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("output_dir"));
        assert!(toml_str.contains("source_extension"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.output_dir, "curricula-out");
        assert_eq!(parsed.defaults.source_extension, "txt");
    }

    #[test]
    fn config_with_directories() {
        let toml_str = r#"
[defaults]
output_dir = "/tmp/out"

[[directories]]
name = "ai"
path = "/data/pdf_curriculum_ai"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.directories.len(), 1);
        assert_eq!(config.directories[0].name, "ai");
        assert_eq!(config.defaults.output_dir, "/tmp/out");
        // Unset key falls back to its default
        assert_eq!(config.defaults.source_extension, "txt");
    }
}

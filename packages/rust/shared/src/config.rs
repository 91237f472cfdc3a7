//! Application configuration for rstgrab.
//!
//! User config lives at `~/.rstgrab/rstgrab.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RstGrabError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "rstgrab.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".rstgrab";

/// Language tag used when `.code_block_start` names none.
pub const DEFAULT_LANGUAGE: &str = "verilog";

// ---------------------------------------------------------------------------
// Config structs (matching rstgrab.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Extraction behaviour.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Emitted stream settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[extract]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Language tag for code blocks that don't name one.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Fail on unterminated blocks instead of dropping them.
    #[serde(default)]
    pub strict: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            strict: false,
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Append the "generated by" footer.
    #[serde(default = "default_true")]
    pub footer: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { footer: true }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Extract options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime extraction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Language tag used when the code-block start line has none.
    pub default_language: String,
    /// Report unterminated blocks as errors.
    pub strict: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            strict: false,
        }
    }
}

impl From<&AppConfig> for ExtractOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_language: config.extract.default_language.clone(),
            strict: config.extract.strict,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.rstgrab/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| RstGrabError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.rstgrab/rstgrab.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| {
        RstGrabError::config(format!("failed to read {}: {e}", path.display()))
    })?;

    toml::from_str(&content).map_err(|e| {
        RstGrabError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| RstGrabError::resource(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| RstGrabError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| RstGrabError::resource(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FindVersionError, Result};

/// Branch prefix that turns on the closest-tag search.
pub const DEFAULT_PREFIX: &str = "release-branch.";

/// Branch whose history is excluded from the closest-tag search.
pub const DEFAULT_MAINLINE: &str = "master";

/// File name looked up at the tree root.
pub const CONFIG_FILE_NAME: &str = "findversion.toml";

/// Represents the complete configuration for findversion.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_mainline")]
    pub mainline: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_mainline() -> String {
    DEFAULT_MAINLINE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prefix: default_prefix(),
            mainline: default_mainline(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `findversion.toml` at the tree root
/// 3. `findversion/config.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `root` - Tree being versioned
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match locate_config(root) {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        FindVersionError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    parse_config(&config_str)
        .map_err(|e| FindVersionError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration text, filling unset keys with defaults.
pub fn parse_config(config_str: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(config_str)
}

fn locate_config(root: &Path) -> Option<PathBuf> {
    let local = root.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("findversion").join("config.toml");
    user.is_file().then_some(user)
}

//! Application configuration for docpush.
//!
//! User config lives at `~/.docpush/docpush.toml`.
//! CLI flags override config file values, which override defaults.
//!
//! The publish core itself never reads this file: it is configured exclusively
//! through the orchestrator builder. The config file is CLI-layer sugar that
//! the `docpush` binary merges into builder calls.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{DocPushError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docpush.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docpush";

/// Default scheme prepended to bare hosts when building upsert URLs.
pub const DEFAULT_SCHEME_PREFIX: &str = "http://";

// ---------------------------------------------------------------------------
// SchemePrefix
// ---------------------------------------------------------------------------

/// Shared scheme-prefix override cell.
///
/// Every orchestrator references one of these. Clones are handles onto the
/// same value, so orchestrators built from clones of a single cell observe
/// each other's overrides — the last write wins, including for instances
/// built earlier that are still in use. Nothing is process-global: two cells
/// created independently never affect each other.
///
/// The cell provides no serialization beyond its own lock; callers running
/// concurrent passes against a shared cell coordinate overrides themselves.
#[derive(Debug, Clone)]
pub struct SchemePrefix(Arc<RwLock<String>>);

impl SchemePrefix {
    /// Create a cell holding the default prefix (`"http://"`).
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(DEFAULT_SCHEME_PREFIX.to_string())))
    }

    /// Overwrite the prefix for every handle onto this cell.
    pub fn set(&self, prefix: impl Into<String>) {
        *self.0.write().expect("scheme prefix lock poisoned") = prefix.into();
    }

    /// Read the current prefix.
    pub fn get(&self) -> String {
        self.0.read().expect("scheme prefix lock poisoned").clone()
    }
}

impl Default for SchemePrefix {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Config structs (matching docpush.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Remote store settings.
    #[serde(default)]
    pub remote: RemoteStoreConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Catalog prefix prepended to every record's folder.
    #[serde(default)]
    pub catalog: String,

    /// Print resolved pages to the console on every pass.
    #[serde(default)]
    pub console_print: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            catalog: String::new(),
            console_print: false,
        }
    }
}

/// `[remote]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStoreConfig {
    /// Remote store domain (bare host or full base URL).
    #[serde(default)]
    pub domain: String,

    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Name of the env var holding the API token (never store the token itself).
    #[serde(default = "default_api_token_env")]
    pub api_token_env: String,
}

impl Default for RemoteStoreConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            api_key_env: default_api_key_env(),
            api_token_env: default_api_token_env(),
        }
    }
}

fn default_api_key_env() -> String {
    "DOCPUSH_API_KEY".into()
}
fn default_api_token_env() -> String {
    "DOCPUSH_API_TOKEN".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docpush/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocPushError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docpush/docpush.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| DocPushError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DocPushError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocPushError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocPushError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocPushError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the API key and token from the env vars named in the config.
/// Both must be set and non-empty before a remote pass can run.
pub fn resolve_credentials(config: &AppConfig) -> Result<(String, String)> {
    let key = require_env(&config.remote.api_key_env)?;
    let token = require_env(&config.remote.api_token_env)?;
    Ok((key, token))
}

fn require_env(var_name: &str) -> Result<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(DocPushError::config(format!(
            "remote credential not found. Set the {var_name} environment variable."
        ))),
    }
}

//! Configuration system for the `TermTask` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/termtask/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use crate::sync::SyncOptions;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFileConfig,
    ui: UiFileConfig,
}

/// `[api]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    url: Option<String>,
    offline_fallback: Option<bool>,
    channel_capacity: Option<usize>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    submit_feedback_ms: Option<u64>,
    success_display_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- API --
    /// Base URL of the task API (e.g., `http://127.0.0.1:8080`).
    pub api_url: String,
    /// Whether a failed initial fetch drops the session into sample mode
    /// (the default) instead of surfacing the error over an empty list.
    pub offline_fallback: bool,
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Delay before an offline add shows success feedback.
    pub submit_feedback: Duration,
    /// How long success feedback stays up before resetting to idle.
    pub success_display: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8080".to_string(),
            offline_fallback: true,
            channel_capacity: 64,
            poll_timeout: Duration::from_millis(50),
            submit_feedback: Duration::from_millis(500),
            success_display: Duration::from_millis(1500),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. Separated from `load()` to enable
    /// unit testing without CLI parsing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            api_url: cli
                .api_url
                .clone()
                .or_else(|| file.api.url.clone())
                .unwrap_or(defaults.api_url),
            offline_fallback: file
                .api
                .offline_fallback
                .unwrap_or(defaults.offline_fallback),
            channel_capacity: file
                .api
                .channel_capacity
                .unwrap_or(defaults.channel_capacity),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            submit_feedback: file
                .ui
                .submit_feedback_ms
                .map_or(defaults.submit_feedback, Duration::from_millis),
            success_display: file
                .ui
                .success_display_ms
                .map_or(defaults.success_display, Duration::from_millis),
        }
    }

    /// Builds the sync driver tunables from this configuration.
    #[must_use]
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            offline_fallback: self.offline_fallback,
            submit_feedback: self.submit_feedback,
            success_display: self.success_display,
            channel_capacity: self.channel_capacity,
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal task list with remote sync")]
pub struct CliArgs {
    /// Base URL of the task API.
    #[arg(long, env = "TERMTASK_API_URL")]
    pub api_url: Option<String>,

    /// Path to config file (default: `~/.config/termtask/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TERMTASK_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/termtask.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available — use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("termtask").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}

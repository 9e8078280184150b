//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.textmenu/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::menu::Behavior;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TextMenuConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MenuConfig {
    pub loop_menu: Option<bool>,
    pub clear_on_loop: Option<bool>,
    pub reshow_on_error: Option<bool>,
    pub raise_on_invalid: Option<bool>,
    pub error_message: Option<String>,
}

/// Values given on the command line. `None` means the flag was not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub loop_menu: Option<bool>,
    pub clear_on_loop: Option<bool>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub behavior: Behavior,
    /// No file means logging stays off.
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.textmenu/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".textmenu").join("config.toml"))
}

/// Load config from `~/.textmenu/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TextMenuConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TextMenuConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TextMenuConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`] for an explicit path.
pub fn load_config_from(path: &Path) -> Result<TextMenuConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TextMenuConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TextMenuConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# textmenu configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_file = "textmenu.log"          # Or set TEXTMENU_LOG_FILE; unset = no logging
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"

# [menu]
# loop_menu = true                   # TEXTMENU_LOOP
# clear_on_loop = true               # TEXTMENU_CLEAR_ON_LOOP
# reshow_on_error = true             # TEXTMENU_RESHOW_ON_ERROR
# raise_on_invalid = true            # TEXTMENU_RAISE_ON_INVALID
# error_message = "Something went wrong"  # TEXTMENU_ERROR_MESSAGE
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `defaults` is the behavior the menu's author chose; config and env only
/// override what they set.
pub fn resolve(config: &TextMenuConfig, cli: &CliOverrides, defaults: Behavior) -> ResolvedConfig {
    resolve_with(config, cli, defaults, |key| std::env::var(key).ok())
}

fn resolve_with(
    config: &TextMenuConfig,
    cli: &CliOverrides,
    defaults: Behavior,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let env_bool = |key: &str| env(key).and_then(|v| parse_bool(key, &v));
    let menu = &config.menu;

    // Flags: CLI → env → config → default
    let loop_menu = cli
        .loop_menu
        .or_else(|| env_bool("TEXTMENU_LOOP"))
        .or(menu.loop_menu)
        .unwrap_or(defaults.loop_menu);

    let clear_on_loop = cli
        .clear_on_loop
        .or_else(|| env_bool("TEXTMENU_CLEAR_ON_LOOP"))
        .or(menu.clear_on_loop)
        .unwrap_or(defaults.clear_on_loop);

    // Flags without a CLI switch: env → config → default
    let reshow_on_error = env_bool("TEXTMENU_RESHOW_ON_ERROR")
        .or(menu.reshow_on_error)
        .unwrap_or(defaults.reshow_on_error);

    let raise_on_invalid = env_bool("TEXTMENU_RAISE_ON_INVALID")
        .or(menu.raise_on_invalid)
        .unwrap_or(defaults.raise_on_invalid);

    // Empty messages count as unset at every level
    let error_message = env("TEXTMENU_ERROR_MESSAGE")
        .filter(|m| !m.is_empty())
        .or_else(|| menu.error_message.clone().filter(|m| !m.is_empty()))
        .or(defaults.error_message.filter(|m| !m.is_empty()));

    // Log file: CLI → env → config → none
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("TEXTMENU_LOG_FILE").map(PathBuf::from))
        .or_else(|| config.general.log_file.as_ref().map(PathBuf::from));

    ResolvedConfig {
        behavior: Behavior {
            raise_on_invalid,
            reshow_on_error,
            error_message,
            loop_menu,
            clear_on_loop,
        },
        log_file,
        log_level: resolve_log_level(config),
    }
}

fn resolve_log_level(config: &TextMenuConfig) -> LevelFilter {
    match config.general.log_level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            warn!("Unknown log level '{}', using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    }
}

fn parse_bool(key: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!("Ignoring {}={:?}: expected a boolean", key, value);
            None
        }
    }
}

//! TOML-based configuration persistence for the OTG front-end.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\Hidbridge\config.toml`
//! - Linux:    `~/.config/hidbridge/config.toml`
//! - macOS:    `~/Library/Application Support/Hidbridge/config.toml`
//!
//! # What is TOML? (for beginners)
//!
//! TOML (Tom's Obvious Minimal Language) is a configuration file format designed
//! to be easy to read and write.  Example:
//!
//! ```toml
//! [window]
//! title = "hidbridge"
//! always_on_top = true
//!
//! [forward]
//! keyboard = true
//! mouse = true
//! ```
//!
//! The `serde` library provides automatic serialisation/deserialisation between
//! Rust structs and TOML text.  The `#[derive(Serialize, Deserialize)]` macros
//! generate all the boilerplate code at compile time.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file.  This allows
//! the app to work correctly on first run (before a config file exists) and
//! when upgrading from an older config file that is missing newer fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: GeneralConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub forward: ForwardConfig,
}

/// General application behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Placement and appearance of the icon window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    /// Window title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Initial horizontal window position; window-manager placement if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    /// Initial vertical window position; window-manager placement if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    /// Window width in logical pixels; 256 if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Window height in logical pixels; 256 if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Keep the window above all others.
    #[serde(default)]
    pub always_on_top: bool,
    /// Create the window without decorations.
    #[serde(default)]
    pub borderless: bool,
}

/// Which input capabilities are forwarded to the device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForwardConfig {
    /// Forward keyboard events.
    #[serde(default = "default_true")]
    pub keyboard: bool,
    /// Forward mouse events (enables pointer capture).
    #[serde(default = "default_true")]
    pub mouse: bool,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_title() -> String {
    "hidbridge".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            x: None,
            y: None,
            width: None,
            height: None,
            always_on_top: false,
            borderless: false,
        }
    }
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            keyboard: true,
            mouse: true,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from disk, returning `AppConfig::default()` if the file
/// does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from an explicit path.  See [`load_config`].
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to disk.
///
/// Creates the config directory and file if they do not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(&config_file_path()?, config)
}

/// Persists `config` to an explicit path.  See [`save_config`].
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    // Ensure directory exists before writing.
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Hidbridge"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("hidbridge"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/Hidbridge
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Hidbridge")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        // Fallback for unsupported platforms.
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── AppConfig defaults ────────────────────────────────────────────────────

    #[test]
    fn test_app_config_default_forwards_both_capabilities() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert!(cfg.forward.keyboard);
        assert!(cfg.forward.mouse);
    }

    #[test]
    fn test_app_config_default_window_has_no_fixed_placement() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.window.title, "hidbridge");
        assert_eq!(cfg.window.x, None);
        assert_eq!(cfg.window.width, None);
        assert!(!cfg.window.always_on_top);
        assert!(!cfg.window.borderless);
    }

    #[test]
    fn test_general_config_default_log_level_is_info() {
        let cfg = GeneralConfig::default();
        assert_eq!(cfg.log_level, "info");
    }

    // ── TOML round-trip ───────────────────────────────────────────────────────

    #[test]
    fn test_app_config_serializes_and_deserializes_round_trip() {
        // Arrange
        let mut cfg = AppConfig::default();
        cfg.window.width = Some(320);
        cfg.window.always_on_top = true;
        cfg.forward.keyboard = false;

        // Act
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: AppConfig = toml::from_str(&toml_str).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_unset_window_placement_is_omitted_from_toml() {
        // Arrange: x/y/width/height are None → should be omitted from TOML
        let cfg = AppConfig::default();

        // Act
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");

        // Assert – the optional fields must not appear in the TOML output
        assert!(!toml_str.contains("x ="), "None x must be omitted");
        assert!(!toml_str.contains("width"), "None width must be omitted");
    }

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        // Arrange: a first-run file may be completely empty
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");

        // Assert
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_deserialize_partial_toml_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[window]
width = 128
height = 128

[forward]
mouse = false
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.window.width, Some(128));
        assert!(!cfg.forward.mouse);
        // Unspecified fields keep their defaults
        assert!(cfg.forward.keyboard);
        assert_eq!(cfg.window.title, "hidbridge");
    }

    #[test]
    fn test_deserialize_invalid_toml_returns_parse_error() {
        // Arrange
        let bad_toml = "[[[ not valid toml";

        // Act
        let result: Result<AppConfig, toml::de::Error> = toml::from_str(bad_toml);

        // Assert
        assert!(result.is_err());
    }

    // ── load/save behaviour ───────────────────────────────────────────────────

    #[test]
    fn test_load_config_from_missing_file_yields_defaults() {
        // Arrange: a known non-existent path exercises the NotFound path
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/config.toml");

        // Act
        let result = load_config_from(&path);

        // Assert
        assert_eq!(result.unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_and_load_config_round_trip_via_temp_dir() {
        // Arrange – the target directory does not exist yet, so the save
        // path also covers directory creation.
        let dir = std::env::temp_dir().join(format!(
            "hidbridge_test_{}_{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let path = dir.join("nested").join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.window.title = "bench rig".to_string();
        cfg.app.log_level = "debug".to_string();

        // Act
        save_config_to(&path, &cfg).expect("save");
        let loaded = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.window.title, "bench rig");
        assert_eq!(loaded.app.log_level, "debug");

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    #[cfg(unix)]
    fn test_save_config_to_unwritable_path_reports_io_error() {
        // /dev/null/... cannot be a directory, so directory creation fails.
        let path = PathBuf::from("/dev/null/hidbridge/config.toml");

        let result = save_config_to(&path, &AppConfig::default());

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    // ── config_dir path formation ─────────────────────────────────────────────

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        let path_result = config_file_path();
        if let Ok(path) = path_result {
            assert!(
                path.ends_with("config.toml"),
                "config file must be named config.toml, got {path:?}"
            );
        }
        // NoPlatformConfigDir (e.g. in a stripped CI env) is also acceptable.
    }
}

// Mycolog - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::Language;
use crate::core::settings::Settings;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for Mycolog configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/mycolog/ or %APPDATA%\Mycolog\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored so a newer config file still loads
/// with an older binary.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[alerts]` section.
    pub alerts: AlertsSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[alerts]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AlertsSection {
    /// Upper temperature bound in °C.
    pub max_temperature: Option<f64>,
    /// Lower humidity bound in %.
    pub min_humidity: Option<f64>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Interface language label.
    pub language: Option<String>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Directory exported files are written to.
    pub directory: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Initial thresholds and language for each new session.
    pub settings: Settings,

    /// Directory the `export` command writes into.
    pub export_dir: PathBuf,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            export_dir: PathBuf::from("."),
            log_level: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning;
/// the application still starts.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let (config, parse_warnings) = parse_config(&content, config_path);
    warnings.extend(parse_warnings);
    (config, warnings)
}

/// Validate config text. Split from `load_config` so the rules can be
/// exercised without touching the filesystem.
pub fn parse_config(content: &str, origin: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: origin.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %origin.display(), "Loaded config.toml");

    let mut config = AppConfig::default();

    // -- Alerts: max_temperature --
    if let Some(value) = raw.alerts.max_temperature {
        if let Err(e) = config.settings.set_max_temperature(value) {
            warnings.push(format!(
                "[alerts] {e}. Using default ({}).",
                constants::DEFAULT_MAX_TEMPERATURE
            ));
        }
    }

    // -- Alerts: min_humidity --
    if let Some(value) = raw.alerts.min_humidity {
        if let Err(e) = config.settings.set_min_humidity(value) {
            warnings.push(format!(
                "[alerts] {e}. Using default ({}).",
                constants::DEFAULT_MIN_HUMIDITY
            ));
        }
    }

    // -- UI: language --
    if let Some(ref label) = raw.ui.language {
        match Language::from_label(label) {
            Some(language) => config.settings.set_language(language),
            None => {
                let valid: Vec<&str> = Language::all().iter().map(|l| l.label()).collect();
                warnings.push(format!(
                    "[ui] language = \"{label}\" is not recognised. \
                     Valid values: {}. Using default (English).",
                    valid.join(", ")
                ));
            }
        }
    }

    // -- Export: directory --
    if let Some(ref dir) = raw.export.directory {
        if !dir.trim().is_empty() {
            config.export_dir = PathBuf::from(dir);
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn origin() -> PathBuf {
        PathBuf::from("config.toml")
    }

    #[test]
    fn test_missing_file_gives_defaults_without_warnings() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"));
        assert!(warnings.is_empty());
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_valid_config_applies_all_sections() {
        let text = r#"
            [alerts]
            max_temperature = 26.5
            min_humidity = 85.0

            [ui]
            language = "Spanish"

            [export]
            directory = "/tmp/reports"

            [logging]
            level = "DEBUG"
        "#;
        let (config, warnings) = parse_config(text, &origin());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.settings.thresholds().max_temperature, 26.5);
        assert_eq!(config.settings.thresholds().min_humidity, 85.0);
        assert_eq!(config.settings.language(), Language::Spanish);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_fall_back() {
        let text = r#"
            [alerts]
            max_temperature = 55.0
            min_humidity = 10.0

            [ui]
            language = "Elvish"

            [logging]
            level = "loud"
        "#;
        let (config, warnings) = parse_config(text, &origin());
        assert_eq!(warnings.len(), 4);
        assert_eq!(config.settings, Settings::default());
        assert!(config.log_level.is_none());
        assert!(warnings[0].contains("max_temperature"));
    }

    #[test]
    fn test_unparseable_config_warns() {
        let (config, warnings) = parse_config("[alerts\nmax_temperature = ", &origin());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Config parse error"));
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let text = "[future]\nfeature = true\n[alerts]\nmax_temperature = 28.0\n";
        let (config, warnings) = parse_config(text, &origin());
        assert!(warnings.is_empty());
        assert_eq!(config.settings.thresholds().max_temperature, 28.0);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[alerts]\nmin_humidity = 70.0\n").unwrap();
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty());
        assert_eq!(config.settings.thresholds().min_humidity, 70.0);
    }
}

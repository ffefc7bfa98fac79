// Mycolog - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Config validation and the command layer both read their bounds from here.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Mycolog";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "Mycolog";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Alert thresholds
// =============================================================================

/// Default upper temperature bound (°C). Readings strictly above it alert.
pub const DEFAULT_MAX_TEMPERATURE: f64 = 30.0;

/// Lowest value the temperature threshold may be set to.
pub const MIN_MAX_TEMPERATURE: f64 = 20.0;

/// Highest value the temperature threshold may be set to.
pub const ABSOLUTE_MAX_TEMPERATURE: f64 = 40.0;

/// Default lower humidity bound (%). Readings strictly below it alert.
pub const DEFAULT_MIN_HUMIDITY: f64 = 80.0;

/// Lowest value the humidity threshold may be set to.
pub const MIN_MIN_HUMIDITY: f64 = 60.0;

/// Highest value the humidity threshold may be set to.
pub const MAX_MIN_HUMIDITY: f64 = 100.0;

// =============================================================================
// Photo references
// =============================================================================

/// Image extensions the photo picker offers. Anything else is accepted with
/// a warning since only the file name is kept.
pub const SUPPORTED_PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// =============================================================================
// Export
// =============================================================================

/// CSV header row, in column order.
pub const CSV_HEADER: [&str; 5] = ["Date", "Temperature", "Humidity", "Growth Stage", "Notes"];

/// Download file name for the CSV report.
pub const CSV_EXPORT_FILE_NAME: &str = "mushroom_growth_log.csv";

/// MIME type offered with the CSV report.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Download file name for the JSON dump.
pub const JSON_EXPORT_FILE_NAME: &str = "mushroom_growth_log.json";

/// MIME type offered with the JSON dump.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Date format used in every export and in command input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Logging / config
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Command loop
// =============================================================================

/// Prompt printed before each interactive command.
pub const PROMPT: &str = "mycolog> ";

/// Marker that starts a comment line in command scripts.
pub const COMMENT_PREFIX: char = '#';

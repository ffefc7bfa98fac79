// Mycolog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant keeps its source so the
// full chain can be logged.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all Mycolog operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum MycologError {
    /// A record could not be added to the growth log.
    Store(StoreError),

    /// Logbook filter construction failed.
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or a settings change failed.
    Config(ConfigError),

    /// A command line could not be understood.
    Command(CommandError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for MycologError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Growth log error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Command(e) => write!(f, "Command error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for MycologError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Command(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors raised while turning a form payload into a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The growth stage is not one of the five known stages.
    InvalidStage { value: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStage { value } => write!(
                f,
                "'{value}' is not a growth stage. \
                 Expected one of: Mycelium, Pinhead, Fruiting, Mature, Harvested"
            ),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for MycologError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to logbook filters.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided notes regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid notes regex '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for MycologError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error flushing or saving the export.
    Io { source: io::Error },

    /// CSV serialisation error.
    Csv { source: csv::Error },

    /// JSON serialisation error.
    Json { source: serde_json::Error },

    /// The in-memory export buffer was not valid UTF-8.
    Utf8 { source: std::string::FromUtf8Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { source } => write!(f, "Export I/O error: {source}"),
            Self::Csv { source } => write!(f, "CSV export error: {source}"),
            Self::Json { source } => write!(f, "JSON export error: {source}"),
            Self::Utf8 { source } => write!(f, "Export produced invalid UTF-8: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            Self::Csv { source } => Some(source),
            Self::Json { source } => Some(source),
            Self::Utf8 { source } => Some(source),
        }
    }
}

impl From<ExportError> for MycologError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading and settings changes.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "'{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for MycologError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// Errors produced while parsing a command line from the session driver.
#[derive(Debug)]
pub enum CommandError {
    /// The line did not match the command grammar, including values clap
    /// could not parse. Carries clap's rendered message.
    Usage { message: String },

    /// A quoted argument was never closed.
    UnterminatedQuote { line: String },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage { message } => f.write_str(message.trim_end()),
            Self::UnterminatedQuote { line } => {
                write!(f, "Unterminated quote in '{line}'")
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl From<CommandError> for MycologError {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

/// Convenience type alias for Mycolog results.
pub type Result<T> = std::result::Result<T, MycologError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_stage_message_lists_stages() {
        let err = StoreError::InvalidStage {
            value: "Sporing".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Sporing"));
        assert!(msg.contains("Harvested"));
    }

    #[test]
    fn test_top_level_error_preserves_source() {
        let err: MycologError = StoreError::InvalidStage {
            value: "x".to_string(),
        }
        .into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Growth log error"));
    }

    #[test]
    fn test_config_range_error_display() {
        let err = ConfigError::ValueOutOfRange {
            field: "min_humidity".to_string(),
            value: "50".to_string(),
            expected: "60-100".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'min_humidity' = '50' is out of range. Expected: 60-100"
        );
        assert!(err.source().is_none());
    }
}

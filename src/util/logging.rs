// Mycolog - util/logging.rs
//
// Diagnostics go to stderr through `tracing`. Stdout carries only the
// command pages and exports, so `mycolog --script ... > log.csv` stays clean.
//
// The level comes from the first of: RUST_LOG, `--debug`, the `[logging]`
// section of config.toml, then "info". Observation notes are only ever
// logged at debug.

use super::constants;
use tracing_subscriber::EnvFilter;

/// Where the active log level was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource {
    Env,
    DebugFlag,
    Config,
    Default,
}

impl LevelSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Env => "RUST_LOG",
            Self::DebugFlag => "--debug",
            Self::Config => "config.toml",
            Self::Default => "default",
        }
    }
}

/// Install the stderr subscriber. Call once, after config.toml is read.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let (filter, source) = select_filter(rust_log.as_deref(), debug_flag, config_level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .init();

    tracing::debug!(
        app = constants::APP_NAME,
        version = constants::APP_VERSION,
        level_from = source.label(),
        "Logging initialised"
    );
}

fn select_filter(
    rust_log: Option<&str>,
    debug_flag: bool,
    config_level: Option<&str>,
) -> (EnvFilter, LevelSource) {
    if let Some(directives) = rust_log {
        (EnvFilter::new(directives), LevelSource::Env)
    } else if debug_flag {
        (EnvFilter::new("debug"), LevelSource::DebugFlag)
    } else if let Some(level) = config_level {
        (EnvFilter::new(level), LevelSource::Config)
    } else {
        (
            EnvFilter::new(constants::DEFAULT_LOG_LEVEL),
            LevelSource::Default,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(filter: &EnvFilter) -> String {
        filter.to_string().to_lowercase()
    }

    #[test]
    fn test_rust_log_wins() {
        let (filter, source) = select_filter(Some("trace"), true, Some("warn"));
        assert_eq!(source, LevelSource::Env);
        assert_eq!(level(&filter), "trace");
    }

    #[test]
    fn test_debug_flag_beats_config_level() {
        let (filter, source) = select_filter(None, true, Some("warn"));
        assert_eq!(source, LevelSource::DebugFlag);
        assert_eq!(level(&filter), "debug");
    }

    #[test]
    fn test_config_level_used_without_flag() {
        let (filter, source) = select_filter(None, false, Some("warn"));
        assert_eq!(source, LevelSource::Config);
        assert_eq!(level(&filter), "warn");
    }

    #[test]
    fn test_default_level() {
        let (filter, source) = select_filter(None, false, None);
        assert_eq!(source, LevelSource::Default);
        assert_eq!(level(&filter), "info");
        assert_eq!(source.label(), "default");
    }
}

// Mycolog - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. The command loop over stdin or a script file

use clap::Parser;
use mycolog::app::driver;
use mycolog::app::session::GrowthSession;
use mycolog::platform::config::{self, PlatformPaths};
use mycolog::util;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

/// Mycolog - mushroom growth logbook.
///
/// Log temperature, humidity, growth stage, and notes for one session,
/// watch threshold alerts, and export the log as CSV.
#[derive(Parser, Debug)]
#[command(name = "mycolog", version, about)]
struct Cli {
    /// Read commands from this file instead of stdin.
    #[arg(short = 's', long = "script")]
    script: Option<PathBuf>,

    /// Use this config file instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "Mycolog starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let mut session = GrowthSession::new(app_config.settings, app_config.export_dir);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let today = || chrono::Local::now().date_naive();

    let result = match cli.script {
        Some(ref path) => match std::fs::File::open(path) {
            Ok(file) => driver::run_session(&mut session, BufReader::new(file), &mut out, false, today),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Cannot open script");
                eprintln!("Error: cannot open script '{}': {e}", path.display());
                std::process::exit(1);
            }
        },
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            driver::run_session(&mut session, stdin.lock(), &mut out, interactive, today)
        }
    };

    match result {
        Ok(summary) if summary.errors > 0 && cli.script.is_some() => {
            // Scripts are expected to run clean.
            eprintln!("{} command(s) failed", summary.errors);
            std::process::exit(2);
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Session ended with an error");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

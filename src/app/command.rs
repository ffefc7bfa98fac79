// Mycolog - app/command.rs
//
// Text command grammar for the session driver.
// Each input line is split into shell-like words and parsed with clap, so
// `help` and `<command> --help` come for free.

use crate::app::session::ExportFormat;
use crate::util::constants::{COMMENT_PREFIX, DATE_FORMAT};
use crate::util::error::CommandError;
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// One line of session input.
#[derive(Parser, Debug)]
#[command(
    name = "mycolog",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Log mushroom growth observations for this session."
)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Show the latest entry and any threshold alerts.
    Dashboard,

    /// Log a new growth observation.
    Add(AddArgs),

    /// Show the temperature and humidity series.
    Trend,

    /// Show all entries as a table (photo column omitted).
    Logbook(LogbookArgs),

    /// Export every entry as CSV (default) or JSON.
    Export(ExportArgs),

    /// Change a setting.
    #[command(subcommand)]
    Set(SetCommand),

    /// Show the current settings.
    Settings,

    /// End the session.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Args, Debug, PartialEq)]
pub struct AddArgs {
    /// Growth stage: Mycelium, Pinhead, Fruiting, Mature, or Harvested.
    pub stage: String,

    /// Temperature in °C.
    #[arg(allow_negative_numbers = true)]
    pub temperature: f64,

    /// Relative humidity in %.
    #[arg(allow_negative_numbers = true)]
    pub humidity: f64,

    /// Observation date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Observation notes.
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub notes: String,

    /// File name of a photo taken with this observation.
    #[arg(short, long, allow_hyphen_values = true)]
    pub photo: Option<String>,
}

#[derive(Args, Debug, PartialEq, Default)]
pub struct LogbookArgs {
    /// Only show these stages (repeatable).
    #[arg(short, long = "stage")]
    pub stages: Vec<String>,

    /// First date to include (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Case-insensitive text to look for in notes.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub search: String,

    /// Regular expression to match against notes.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub regex: String,
}

#[derive(Args, Debug, PartialEq)]
pub struct ExportArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Directory to save into. Defaults to the configured export directory.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the export instead of saving it.
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SetCommand {
    /// Alert when temperature rises above this value (20-40 °C).
    #[command(alias = "max-temp")]
    MaxTemperature {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Alert when humidity falls below this value (60-100 %).
    #[command(alias = "min-hum")]
    MinHumidity {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Interface language: English, Spanish, French, or German.
    Language { value: String },
}

/// Result of parsing one input line.
#[derive(Debug, PartialEq)]
pub enum ParsedLine {
    /// Blank line or comment.
    Empty,

    /// Help or usage text requested by the user.
    Help(String),

    Command(Command),
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

/// Parse one line of input.
pub fn parse_line(line: &str) -> Result<ParsedLine, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
        return Ok(ParsedLine::Empty);
    }

    let words = split_words(trimmed)?;
    match CommandLine::try_parse_from(words) {
        Ok(parsed) => Ok(ParsedLine::Command(parsed.command)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::DisplayVersion => Ok(ParsedLine::Help(e.render().to_string())),
            _ => Err(CommandError::Usage {
                message: e.render().to_string(),
            }),
        },
    }
}

/// Split a line into words, honouring single and double quotes.
///
/// Inside double quotes a backslash escapes the next character. Quotes
/// may appear mid-word (`--notes="a b"`).
pub fn split_words(line: &str) -> Result<Vec<String>, CommandError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => return Err(unterminated(line)),
                        },
                        Some(other) => current.push(other),
                        None => return Err(unterminated(line)),
                    }
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(other) => current.push(other),
                        None => return Err(unterminated(line)),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn unterminated(line: &str) -> CommandError {
    CommandError::UnterminatedQuote {
        line: line.to_string(),
    }
}

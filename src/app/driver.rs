// Mycolog - app/driver.rs
//
// Command loop: reads lines, parses them, applies them to a session, and
// writes the resulting page. A bad command or an undecodable line prints an
// error and the loop carries on. Only a failed read or write ends it early.

use crate::app::command::{self, AddArgs, Command, LogbookArgs, ParsedLine, SetCommand};
use crate::app::session::GrowthSession;
use crate::app::view;
use crate::core::filter::LogbookFilter;
use crate::core::model::{GrowthStage, Language, RecordInput};
use crate::util::constants;
use crate::util::error::{ConfigError, MycologError, Result};
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Whether the loop should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Commands that completed successfully.
    pub commands: usize,
    /// Lines that failed to parse or execute.
    pub errors: usize,
}

fn output_error(source: io::Error) -> MycologError {
    MycologError::Io {
        path: PathBuf::from("<output>"),
        operation: "write",
        source,
    }
}

/// Read commands from `input` until EOF or `quit`.
///
/// `today` is consulted for every `add` without an explicit date. When
/// `interactive` is set a prompt is written before each line.
pub fn run_session<R, W, F>(
    session: &mut GrowthSession,
    mut input: R,
    out: &mut W,
    interactive: bool,
    mut today: F,
) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> NaiveDate,
{
    let mut summary = RunSummary::default();

    if interactive {
        writeln!(
            out,
            "{} {} - type 'help' for commands.",
            constants::APP_NAME,
            constants::APP_VERSION
        )
        .map_err(output_error)?;
    }

    let mut buf = Vec::new();
    let mut line_no = 0usize;
    loop {
        if interactive {
            write!(out, "{}", constants::PROMPT).map_err(output_error)?;
            out.flush().map_err(output_error)?;
        }

        buf.clear();
        let read = input.read_until(b'\n', &mut buf).map_err(|e| MycologError::Io {
            path: PathBuf::from("<input>"),
            operation: "read",
            source: e,
        })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let line = match decode_line(&buf) {
            Some(line) => line,
            None => {
                summary.errors += 1;
                tracing::debug!(line = line_no, "Input line is not valid UTF-8");
                writeln!(out, "error: line {line_no} is not valid UTF-8; skipped")
                    .map_err(output_error)?;
                continue;
            }
        };

        let outcome = command::parse_line(line)
            .map_err(MycologError::from)
            .and_then(|parsed| match parsed {
                ParsedLine::Empty => Ok(None),
                ParsedLine::Help(text) => {
                    write!(out, "{text}").map_err(output_error)?;
                    Ok(None)
                }
                ParsedLine::Command(cmd) => execute(session, cmd, today(), out).map(Some),
            });

        match outcome {
            Ok(None) => {}
            Ok(Some(flow)) => {
                summary.commands += 1;
                if flow == Flow::Quit {
                    break;
                }
            }
            Err(e) if is_output_failure(&e) => return Err(e),
            Err(e) => {
                summary.errors += 1;
                tracing::debug!(line = %line, error = %e, "Command failed");
                writeln!(out, "error: {e}").map_err(output_error)?;
            }
        }
    }

    tracing::info!(
        commands = summary.commands,
        errors = summary.errors,
        records = session.store().len(),
        "Session finished"
    );
    Ok(summary)
}

/// Strip the line terminator. `None` when the bytes are not UTF-8.
fn decode_line(buf: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(buf).ok()?;
    let text = text.strip_suffix('\n').unwrap_or(text);
    Some(text.strip_suffix('\r').unwrap_or(text))
}

fn is_output_failure(e: &MycologError) -> bool {
    matches!(e, MycologError::Io { operation: "write", .. })
}

/// Apply one command to the session and render its page to `out`.
pub fn execute<W: Write>(
    session: &mut GrowthSession,
    command: Command,
    today: NaiveDate,
    out: &mut W,
) -> Result<Flow> {
    match command {
        Command::Dashboard => {
            view::render_dashboard(out, &session.dashboard()).map_err(output_error)?;
        }
        Command::Add(args) => add(session, args, today, out)?,
        Command::Trend => {
            view::render_trend(out, &session.trend()).map_err(output_error)?;
        }
        Command::Logbook(args) => {
            let filter = build_filter(&args)?;
            view::render_logbook(out, &session.logbook(&filter)).map_err(output_error)?;
        }
        Command::Export(args) => {
            let artifact = session.build_export(args.format)?;
            if args.stdout {
                write!(out, "{}", artifact.contents).map_err(output_error)?;
            } else {
                let path = session.save_export(&artifact, args.out.as_deref())?;
                writeln!(
                    out,
                    "Saved {} record(s) to {} ({})",
                    artifact.records,
                    path.display(),
                    artifact.mime_type
                )
                .map_err(output_error)?;
            }
        }
        Command::Set(set) => {
            apply_setting(session, set)?;
            view::render_settings(out, session.settings()).map_err(output_error)?;
        }
        Command::Settings => {
            view::render_settings(out, session.settings()).map_err(output_error)?;
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn add<W: Write>(
    session: &mut GrowthSession,
    args: AddArgs,
    today: NaiveDate,
    out: &mut W,
) -> Result<()> {
    let input = RecordInput {
        date: args.date,
        temperature: args.temperature,
        humidity: args.humidity,
        stage: args.stage,
        notes: args.notes,
        photo: args.photo,
    };
    session.submit(input, today)?;

    writeln!(out, "{}", session.status_message).map_err(output_error)?;
    for warning in session.take_warnings() {
        writeln!(out, "warning: {warning}").map_err(output_error)?;
    }

    // Surface alerts for the new entry straight away.
    let dashboard = session.dashboard();
    if let Some(latest) = dashboard.latest {
        for kind in dashboard.alerts.iter() {
            writeln!(out, "ALERT: {}", kind.message(latest, &dashboard.thresholds))
                .map_err(output_error)?;
        }
    }
    Ok(())
}

fn build_filter(args: &LogbookArgs) -> Result<LogbookFilter> {
    let mut filter = LogbookFilter {
        date_start: args.from,
        date_end: args.to,
        text_search: args.search.clone(),
        ..Default::default()
    };
    for label in &args.stages {
        filter.stages.insert(label.parse::<GrowthStage>()?);
    }
    filter.set_regex(&args.regex)?;
    Ok(filter)
}

fn apply_setting(session: &mut GrowthSession, set: SetCommand) -> Result<()> {
    let settings = session.settings_mut();
    match set {
        SetCommand::MaxTemperature { value } => settings.set_max_temperature(value)?,
        SetCommand::MinHumidity { value } => settings.set_min_humidity(value)?,
        SetCommand::Language { value } => {
            let language = Language::from_label(&value).ok_or_else(|| {
                ConfigError::ValueOutOfRange {
                    field: "language".to_string(),
                    value: value.clone(),
                    expected: "English, Spanish, French, or German".to_string(),
                }
            })?;
            settings.set_language(language);
        }
    }
    session.status_message = "Settings updated.".to_string();
    Ok(())
}

// Mycolog - app/view.rs
//
// Plain-text renderings of the session pages: dashboard, trend table,
// logbook table, and settings. Everything writes to a `Write` so the same
// code serves stdout and tests.

use crate::app::session::Dashboard;
use crate::core::model::{LogbookRow, TrendPoint};
use crate::core::settings::Settings;
use crate::util::constants::DATE_FORMAT;
use std::io::{self, Write};

/// Latest readings, stage, notes, and any active alerts.
pub fn render_dashboard<W: Write>(out: &mut W, dashboard: &Dashboard<'_>) -> io::Result<()> {
    let Some(latest) = dashboard.latest else {
        return writeln!(out, "No entries yet. Use 'add' to log an observation.");
    };

    writeln!(out, "Last recorded temperature: {}°C", latest.temperature)?;
    writeln!(out, "Last recorded humidity:    {}%", latest.humidity)?;
    writeln!(out, "Last stage:                {}", latest.stage)?;
    writeln!(out, "Notes:                     {}", latest.notes)?;
    if let Some(ref photo) = latest.photo {
        writeln!(out, "Photo:                     {photo}")?;
    }
    writeln!(out, "Entries logged:            {}", dashboard.record_count)?;

    if dashboard.alerts.is_empty() {
        writeln!(out, "Conditions within thresholds.")?;
    } else {
        for kind in dashboard.alerts.iter() {
            writeln!(out, "ALERT: {}", kind.message(latest, &dashboard.thresholds))?;
        }
    }
    Ok(())
}

/// Trend data as a three-column table.
pub fn render_trend<W: Write>(out: &mut W, points: &[TrendPoint]) -> io::Result<()> {
    if points.is_empty() {
        return writeln!(out, "No data to display. Please add log entries.");
    }

    writeln!(out, "{:<10}  {:>16}  {:>12}", "Date", "Temperature (°C)", "Humidity (%)")?;
    for point in points {
        writeln!(
            out,
            "{:<10}  {:>16}  {:>12}",
            point.date.format(DATE_FORMAT).to_string(),
            point.temperature,
            point.humidity
        )?;
    }
    Ok(())
}

/// Logbook table. Rows are numbered by their position in the log.
pub fn render_logbook<W: Write>(out: &mut W, rows: &[LogbookRow<'_>]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No logs available.");
    }

    writeln!(
        out,
        "{:>4}  {:<10}  {:>11}  {:>8}  {:<9}  Notes",
        "#", "Date", "Temperature", "Humidity", "Stage"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>4}  {:<10}  {:>11}  {:>8}  {:<9}  {}",
            row.index + 1,
            row.date.format(DATE_FORMAT).to_string(),
            row.temperature,
            row.humidity,
            row.stage.label(),
            row.notes
        )?;
    }
    Ok(())
}

pub fn render_settings<W: Write>(out: &mut W, settings: &Settings) -> io::Result<()> {
    let thresholds = settings.thresholds();
    writeln!(out, "Max temperature: {}°C", thresholds.max_temperature)?;
    writeln!(out, "Min humidity:    {}%", thresholds.min_humidity)?;
    writeln!(out, "Language:        {}", settings.language())
}

// Mycolog - core/export.rs
//
// CSV and JSON export of growth log records.
// Core layer: writes to any Write trait object.

use crate::core::model::GrowthLogRecord;
use crate::util::constants::{CSV_HEADER, DATE_FORMAT};
use crate::util::error::ExportError;
use std::io::Write;

/// Export records to CSV.
///
/// Writes: Date, Temperature, Humidity, Growth Stage, Notes. The photo
/// reference is never exported. Quoting follows RFC 4180 via the csv crate,
/// so notes with commas, quotes, or newlines survive a round trip.
pub fn export_csv<W: Write>(records: &[GrowthLogRecord], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| ExportError::Csv { source: e })?;

    let mut count = 0;
    for record in records {
        let date = record.date.format(DATE_FORMAT).to_string();
        let temperature = record.temperature.to_string();
        let humidity = record.humidity.to_string();
        csv_writer
            .write_record([
                date.as_str(),
                temperature.as_str(),
                humidity.as_str(),
                record.stage.label(),
                record.notes.as_str(),
            ])
            .map_err(|e| ExportError::Csv { source: e })?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| ExportError::Io { source: e })?;

    Ok(count)
}

/// Export records to JSON (array of objects, photo reference included).
pub fn export_json<W: Write>(
    records: &[GrowthLogRecord],
    writer: W,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json { source: e })?;
    Ok(records.len())
}

/// Render records as a CSV string.
pub fn to_csv_string(records: &[GrowthLogRecord]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    export_csv(records, &mut buf)?;
    String::from_utf8(buf).map_err(|e| ExportError::Utf8 { source: e })
}

/// Render records as a pretty-printed JSON string.
pub fn to_json_string(records: &[GrowthLogRecord]) -> Result<String, ExportError> {
    serde_json::to_string_pretty(records).map_err(|e| ExportError::Json { source: e })
}

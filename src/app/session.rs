// Mycolog - app/session.rs
//
// One user's working session: the growth log, its settings, and the
// status line shown after each action.
//
// Nothing here outlives the process. Each session owns its own store and
// settings; sessions never share a store.

use crate::core::alert::AlertSet;
use crate::core::filter::LogbookFilter;
use crate::core::model::{AlertThresholds, GrowthLogRecord, LogbookRow, RecordInput, TrendPoint};
use crate::core::settings::Settings;
use crate::core::store::GrowthLogStore;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{ExportError, MycologError, StoreError};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Export file flavours offered by the export page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => constants::CSV_EXPORT_FILE_NAME,
            ExportFormat::Json => constants::JSON_EXPORT_FILE_NAME,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => constants::CSV_MIME_TYPE,
            ExportFormat::Json => constants::JSON_MIME_TYPE,
        }
    }
}

/// A rendered export, ready to be offered for download or saved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
    /// Number of records in the export.
    pub records: usize,
}

/// Dashboard snapshot: the latest record and its alerts under the current
/// thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
    pub latest: Option<&'a GrowthLogRecord>,
    pub alerts: AlertSet,
    pub thresholds: AlertThresholds,
    pub record_count: usize,
}

/// Top-level session state.
#[derive(Debug)]
pub struct GrowthSession {
    store: GrowthLogStore,
    settings: Settings,
    export_dir: PathBuf,

    /// Status message for the most recent action.
    pub status_message: String,

    /// Non-fatal warnings not yet handed to the front end.
    warnings: Vec<String>,
}

impl GrowthSession {
    /// Create an empty session with the given starting settings.
    pub fn new(settings: Settings, export_dir: PathBuf) -> Self {
        Self {
            store: GrowthLogStore::new(),
            settings,
            export_dir,
            status_message: "Ready. Add a log entry to begin.".to_string(),
            warnings: Vec::new(),
        }
    }

    pub fn store(&self) -> &GrowthLogStore {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings; threshold changes apply to the next evaluation.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Submit a new log entry from the entry form.
    pub fn submit(
        &mut self,
        input: RecordInput,
        today: NaiveDate,
    ) -> Result<&GrowthLogRecord, StoreError> {
        let record = self.store.submit(input, today)?;

        if !record.has_supported_photo() {
            let msg = format!(
                "Photo '{}' is not a {} file; the name was kept anyway.",
                record.photo.as_deref().unwrap_or_default(),
                constants::SUPPORTED_PHOTO_EXTENSIONS.join("/")
            );
            tracing::warn!("{}", msg);
            self.warnings.push(msg);
        }

        self.status_message = "Entry submitted successfully!".to_string();
        Ok(record)
    }

    /// Drain the warnings raised since the last call.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// Latest record and its alerts against the current thresholds.
    pub fn dashboard(&self) -> Dashboard<'_> {
        let thresholds = *self.settings.thresholds();
        Dashboard {
            latest: self.store.latest(),
            alerts: self.store.latest_alerts(&thresholds).unwrap_or_default(),
            thresholds,
            record_count: self.store.len(),
        }
    }

    /// Points for the two-series trend chart.
    pub fn trend(&self) -> Vec<TrendPoint> {
        self.store.time_series()
    }

    /// Logbook rows passing `filter`, photo column omitted.
    pub fn logbook(&self, filter: &LogbookFilter) -> Vec<LogbookRow<'_>> {
        self.store.logbook_filtered(filter)
    }

    /// Render the whole log in `format`.
    pub fn build_export(&self, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
        let contents = match format {
            ExportFormat::Csv => self.store.to_csv()?,
            ExportFormat::Json => self.store.to_json()?,
        };
        Ok(ExportArtifact {
            file_name: format.file_name(),
            mime_type: format.mime_type(),
            contents,
            records: self.store.len(),
        })
    }

    /// Save an export under `dir` (or the configured export directory).
    ///
    /// Returns the written path.
    pub fn save_export(
        &mut self,
        artifact: &ExportArtifact,
        dir: Option<&Path>,
    ) -> Result<PathBuf, MycologError> {
        let path = dir.unwrap_or(self.export_dir.as_path()).join(artifact.file_name);
        fs::write_atomic(&path, artifact.contents.as_bytes()).map_err(|e| MycologError::Io {
            path: path.clone(),
            operation: "export",
            source: e,
        })?;

        tracing::info!(
            path = %path.display(),
            records = artifact.records,
            mime = artifact.mime_type,
            "Export saved"
        );
        self.status_message = format!(
            "Exported {} record(s) to {}",
            artifact.records,
            path.display()
        );
        Ok(path)
    }
}

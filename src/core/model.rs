// Mycolog - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use crate::util::error::StoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

// =============================================================================
// Growth stage
// =============================================================================

/// Lifecycle phase of a mushroom culture, in the order a culture passes
/// through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrowthStage {
    Mycelium,
    Pinhead,
    Fruiting,
    Mature,
    Harvested,
}

impl GrowthStage {
    /// Returns all variants in lifecycle order.
    pub fn all() -> &'static [GrowthStage] {
        &[
            GrowthStage::Mycelium,
            GrowthStage::Pinhead,
            GrowthStage::Fruiting,
            GrowthStage::Mature,
            GrowthStage::Harvested,
        ]
    }

    /// Human-readable label, also used as the CSV value.
    pub fn label(&self) -> &'static str {
        match self {
            GrowthStage::Mycelium => "Mycelium",
            GrowthStage::Pinhead => "Pinhead",
            GrowthStage::Fruiting => "Fruiting",
            GrowthStage::Mature => "Mature",
            GrowthStage::Harvested => "Harvested",
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GrowthStage {
    type Err = StoreError;

    /// Case-insensitive match against the stage labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GrowthStage::all()
            .iter()
            .copied()
            .find(|stage| stage.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StoreError::InvalidStage {
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Growth log record
// =============================================================================

/// One logged growth observation.
///
/// Records have no id of their own; they are identified by their position
/// in the log. Once appended a record is never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthLogRecord {
    /// Observation date.
    pub date: NaiveDate,

    /// Temperature in °C. Unchecked; negative values are valid.
    pub temperature: f64,

    /// Relative humidity in %. Unchecked.
    pub humidity: f64,

    pub stage: GrowthStage,

    /// Free-form observation notes, possibly empty.
    pub notes: String,

    /// File name of an associated photo. The image bytes live elsewhere.
    pub photo: Option<String>,
}

impl GrowthLogRecord {
    /// Build a record with no photo attached.
    pub fn new(
        date: NaiveDate,
        temperature: f64,
        humidity: f64,
        stage: GrowthStage,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date,
            temperature,
            humidity,
            stage,
            notes: notes.into(),
            photo: None,
        }
    }

    /// Attach a photo file name.
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// True when the photo name, if any, has an extension the picker offers.
    pub fn has_supported_photo(&self) -> bool {
        self.photo.as_deref().map_or(true, is_supported_photo)
    }
}

/// Whether `name` ends in one of `SUPPORTED_PHOTO_EXTENSIONS` (case-insensitive).
pub fn is_supported_photo(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            constants::SUPPORTED_PHOTO_EXTENSIONS
                .iter()
                .any(|ok| ext.eq_ignore_ascii_case(ok))
        })
        .unwrap_or(false)
}

// =============================================================================
// Form payload
// =============================================================================

/// Loosely-typed submission as it arrives from an entry form.
///
/// Converted into a `GrowthLogRecord` by `into_record`, which is the only
/// place the stage text is validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordInput {
    /// Observation date; `None` means "today".
    pub date: Option<NaiveDate>,
    pub temperature: f64,
    pub humidity: f64,
    /// Stage label as typed or selected.
    pub stage: String,
    pub notes: String,
    pub photo: Option<String>,
}

impl RecordInput {
    /// Validate the stage and fill defaults.
    ///
    /// A missing date becomes `today`; a blank photo name is dropped.
    pub fn into_record(self, today: NaiveDate) -> Result<GrowthLogRecord, StoreError> {
        let stage = self.stage.parse::<GrowthStage>()?;
        let photo = self
            .photo
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(GrowthLogRecord {
            date: self.date.unwrap_or(today),
            temperature: self.temperature,
            humidity: self.humidity,
            stage,
            notes: self.notes,
            photo,
        })
    }
}

// =============================================================================
// Thresholds and settings
// =============================================================================

/// Bounds used to flag out-of-range readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Temperatures strictly above this alert.
    pub max_temperature: f64,

    /// Humidity strictly below this alerts.
    pub min_humidity: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            max_temperature: constants::DEFAULT_MAX_TEMPERATURE,
            min_humidity: constants::DEFAULT_MIN_HUMIDITY,
        }
    }
}

/// Interface language. Stored with the settings; nothing is translated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Spanish,
            Language::French,
            Language::German,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(s: &str) -> Option<Language> {
        let wanted = s.trim();
        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.label().eq_ignore_ascii_case(wanted))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Derived views
// =============================================================================

/// One point of the trend chart: both series share the date axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
}

impl From<&GrowthLogRecord> for TrendPoint {
    fn from(record: &GrowthLogRecord) -> Self {
        Self {
            date: record.date,
            temperature: record.temperature,
            humidity: record.humidity,
        }
    }
}

/// Logbook table row: a record with the photo column dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogbookRow<'a> {
    /// Position of the record in the log (0-based).
    pub index: usize,
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
    pub stage: GrowthStage,
    pub notes: &'a str,
}

impl<'a> LogbookRow<'a> {
    pub fn new(index: usize, record: &'a GrowthLogRecord) -> Self {
        Self {
            index,
            date: record.date,
            temperature: record.temperature,
            humidity: record.humidity,
            stage: record.stage,
            notes: &record.notes,
        }
    }
}

// Mycolog - core/settings.rs
//
// User-adjustable session settings: alert thresholds and language.
// Setters enforce the ranges the settings page offers; changes apply to
// every later alert evaluation and never re-tag stored records.

use crate::core::model::{AlertThresholds, Language};
use crate::util::constants;
use crate::util::error::ConfigError;

/// Settings owned by one session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Settings {
    thresholds: AlertThresholds,
    language: Language,
}

impl Settings {
    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Set the upper temperature bound. Must lie in
    /// `MIN_MAX_TEMPERATURE..=ABSOLUTE_MAX_TEMPERATURE`.
    pub fn set_max_temperature(&mut self, value: f64) -> Result<(), ConfigError> {
        check_range(
            "max_temperature",
            value,
            constants::MIN_MAX_TEMPERATURE,
            constants::ABSOLUTE_MAX_TEMPERATURE,
        )?;
        self.thresholds.max_temperature = value;
        tracing::info!(max_temperature = value, "Temperature threshold updated");
        Ok(())
    }

    /// Set the lower humidity bound. Must lie in
    /// `MIN_MIN_HUMIDITY..=MAX_MIN_HUMIDITY`.
    pub fn set_min_humidity(&mut self, value: f64) -> Result<(), ConfigError> {
        check_range(
            "min_humidity",
            value,
            constants::MIN_MIN_HUMIDITY,
            constants::MAX_MIN_HUMIDITY,
        )?;
        self.thresholds.min_humidity = value;
        tracing::info!(min_humidity = value, "Humidity threshold updated");
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        tracing::info!(language = %language, "Language updated");
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN fails `contains`, so it is rejected along with out-of-range values.
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: format!("{min}-{max}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.thresholds().max_temperature, 30.0);
        assert_eq!(settings.thresholds().min_humidity, 80.0);
        assert_eq!(settings.language(), Language::English);
    }

    #[test]
    fn test_thresholds_accept_range_edges() {
        let mut settings = Settings::default();
        settings.set_max_temperature(20.0).unwrap();
        settings.set_max_temperature(40.0).unwrap();
        settings.set_min_humidity(60.0).unwrap();
        settings.set_min_humidity(100.0).unwrap();
        assert_eq!(settings.thresholds().max_temperature, 40.0);
        assert_eq!(settings.thresholds().min_humidity, 100.0);
    }

    #[test]
    fn test_out_of_range_leaves_value_unchanged() {
        let mut settings = Settings::default();
        assert!(settings.set_max_temperature(45.0).is_err());
        assert!(settings.set_min_humidity(59.9).is_err());
        assert!(settings.set_min_humidity(f64::NAN).is_err());
        assert_eq!(settings.thresholds(), &AlertThresholds::default());
    }

    #[test]
    fn test_language_change() {
        let mut settings = Settings::default();
        settings.set_language(Language::French);
        assert_eq!(settings.language(), Language::French);
    }
}

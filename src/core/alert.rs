// Mycolog - core/alert.rs
//
// Threshold alert evaluation.
// Comparisons are strict: a reading equal to its bound does not alert.

use crate::core::model::{AlertThresholds, GrowthLogRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// A reading that crossed its configured bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AlertKind {
    HighTemperature,
    LowHumidity,
}

impl AlertKind {
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::HighTemperature => "High temperature",
            AlertKind::LowHumidity => "Low humidity",
        }
    }

    /// One-line warning describing the reading against its bound.
    pub fn message(&self, record: &GrowthLogRecord, thresholds: &AlertThresholds) -> String {
        match self {
            AlertKind::HighTemperature => format!(
                "Temperature {}°C is above the {}°C limit",
                record.temperature, thresholds.max_temperature
            ),
            AlertKind::LowHumidity => format!(
                "Humidity {}% is below the {}% minimum",
                record.humidity, thresholds.min_humidity
            ),
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of alerts raised by one record, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertSet(BTreeSet<AlertKind>);

impl AlertSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, kind: AlertKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = AlertKind> + '_ {
        self.0.iter().copied()
    }

    fn insert(&mut self, kind: AlertKind) {
        self.0.insert(kind);
    }
}

impl FromIterator<AlertKind> for AlertSet {
    fn from_iter<I: IntoIterator<Item = AlertKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Evaluate one record against the thresholds.
///
/// `HighTemperature` when `temperature > max_temperature`, `LowHumidity`
/// when `humidity < min_humidity`, both when both hold. NaN readings never
/// alert since every comparison with NaN is false.
pub fn evaluate_alerts(record: &GrowthLogRecord, thresholds: &AlertThresholds) -> AlertSet {
    let mut alerts = AlertSet::default();
    if record.temperature > thresholds.max_temperature {
        alerts.insert(AlertKind::HighTemperature);
    }
    if record.humidity < thresholds.min_humidity {
        alerts.insert(AlertKind::LowHumidity);
    }
    if !alerts.is_empty() {
        tracing::debug!(
            date = %record.date,
            alerts = alerts.len(),
            "Reading crossed alert thresholds"
        );
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::GrowthStage;
    use chrono::NaiveDate;

    fn reading(temperature: f64, humidity: f64) -> GrowthLogRecord {
        GrowthLogRecord::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            temperature,
            humidity,
            GrowthStage::Pinhead,
            "",
        )
    }

    #[test]
    fn test_high_temperature_only() {
        let alerts = evaluate_alerts(&reading(31.0, 80.0), &AlertThresholds::default());
        assert_eq!(alerts, [AlertKind::HighTemperature].into_iter().collect());
    }

    #[test]
    fn test_low_humidity_with_boundary_temperature() {
        // Exactly 30.0 must not trigger the temperature alert.
        let alerts = evaluate_alerts(&reading(30.0, 79.9), &AlertThresholds::default());
        assert_eq!(alerts, [AlertKind::LowHumidity].into_iter().collect());
    }

    #[test]
    fn test_both_bounds_equal_is_quiet() {
        let alerts = evaluate_alerts(&reading(30.0, 80.0), &AlertThresholds::default());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_both_alerts() {
        let alerts = evaluate_alerts(&reading(35.5, 50.0), &AlertThresholds::default());
        assert_eq!(alerts.len(), 2);
        assert!(alerts.contains(AlertKind::HighTemperature));
        assert!(alerts.contains(AlertKind::LowHumidity));
    }

    #[test]
    fn test_custom_thresholds_take_effect() {
        let thresholds = AlertThresholds {
            max_temperature: 25.0,
            min_humidity: 60.0,
        };
        let alerts = evaluate_alerts(&reading(26.0, 70.0), &thresholds);
        assert_eq!(alerts, [AlertKind::HighTemperature].into_iter().collect());
    }

    #[test]
    fn test_negative_temperature_is_valid() {
        let alerts = evaluate_alerts(&reading(-4.0, 95.0), &AlertThresholds::default());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_alert_message_mentions_bound() {
        let record = reading(31.5, 90.0);
        let msg = AlertKind::HighTemperature.message(&record, &AlertThresholds::default());
        assert!(msg.contains("31.5"));
        assert!(msg.contains("30"));
    }
}

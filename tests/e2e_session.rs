// Mycolog - tests/e2e_session.rs
//
// End-to-end tests for the growth log: real command parsing, real CSV
// writing and reading, real config files and export files on disk.
// No mocks.

use chrono::NaiveDate;
use mycolog::app::driver::{run_session, RunSummary};
use mycolog::app::session::{ExportFormat, GrowthSession};
use mycolog::core::alert::{evaluate_alerts, AlertKind};
use mycolog::core::model::{AlertThresholds, GrowthLogRecord, GrowthStage};
use mycolog::core::settings::Settings;
use mycolog::core::store::GrowthLogStore;
use mycolog::platform::config::load_config;
use std::io::Cursor;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fixed_today() -> NaiveDate {
    date(2024, 8, 30)
}

/// Parse CSV text back into (date, temperature, humidity, stage, notes) rows.
fn read_csv(text: &str) -> (Vec<String>, Vec<(String, f64, f64, String, String)>) {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (
                r[0].to_string(),
                r[1].parse().unwrap(),
                r[2].parse().unwrap(),
                r[3].to_string(),
                r[4].to_string(),
            )
        })
        .collect();
    (header, rows)
}

// =============================================================================
// Store E2E
// =============================================================================

/// Two records with awkward notes survive a CSV round trip through a
/// standard parser; the photo column is not exported.
#[test]
fn e2e_csv_round_trips_through_standard_parser() {
    let mut store = GrowthLogStore::new();
    let first = GrowthLogRecord::new(
        date(2024, 3, 1),
        21.7,
        92.25,
        GrowthStage::Mycelium,
        "Jar 3, \"fluffy\" growth",
    )
    .with_photo("jar3.jpg");
    let second = GrowthLogRecord::new(
        date(2024, 3, 9),
        -1.5,
        78.0,
        GrowthStage::Pinhead,
        "line one\nline two",
    );
    store.append(first.clone());
    store.append(second.clone());

    let text = store.to_csv().unwrap();
    assert!(!text.contains("jar3.jpg"));

    let (header, rows) = read_csv(&text);
    assert_eq!(
        header,
        vec!["Date", "Temperature", "Humidity", "Growth Stage", "Notes"]
    );
    assert_eq!(rows.len(), 2);
    for (row, record) in rows.iter().zip([&first, &second]) {
        assert_eq!(row.0, record.date.format("%Y-%m-%d").to_string());
        assert_eq!(row.1, record.temperature);
        assert_eq!(row.2, record.humidity);
        assert_eq!(row.3, record.stage.label());
        assert_eq!(row.4, record.notes);
    }
}

/// Threshold examples: strict comparisons at the default bounds.
#[test]
fn e2e_alert_boundaries() {
    let thresholds = AlertThresholds::default();
    let at = |t: f64, h: f64| {
        evaluate_alerts(
            &GrowthLogRecord::new(date(2024, 1, 1), t, h, GrowthStage::Fruiting, ""),
            &thresholds,
        )
    };

    let high = at(31.0, 80.0);
    assert!(high.contains(AlertKind::HighTemperature) && high.len() == 1);

    let low = at(30.0, 79.9);
    assert!(low.contains(AlertKind::LowHumidity) && low.len() == 1);

    assert!(at(30.0, 80.0).is_empty());
}

/// A fresh store answers every query with "no data" rather than failing.
#[test]
fn e2e_empty_store() {
    let store = GrowthLogStore::new();
    assert!(store.all().is_empty());
    assert!(store.latest().is_none());
    assert!(store.time_series().is_empty());
    let (header, rows) = read_csv(&store.to_csv().unwrap());
    assert_eq!(header.len(), 5);
    assert!(rows.is_empty());
}

// =============================================================================
// Session E2E
// =============================================================================

/// Drive a whole session from a script: entries, a threshold change, and a
/// CSV export written to disk.
#[test]
fn e2e_scripted_session_exports_csv() {
    let dir = TempDir::new().unwrap();
    let script = format!(
        "# morning check\n\
         add mycelium 22 90 --date 2024-08-01 --notes \"inoculated, 5 jars\"\n\
         add pinhead 24.5 86 --date 2024-08-12 --photo pins.png\n\
         add fruiting 27 82\n\
         set max-temp 26\n\
         dashboard\n\
         trend\n\
         export --out {}\n\
         quit\n",
        dir.path().display()
    );

    let mut session = GrowthSession::new(Settings::default(), std::path::PathBuf::from("."));
    let mut out = Vec::new();
    let summary = run_session(
        &mut session,
        Cursor::new(script),
        &mut out,
        false,
        fixed_today,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(summary, RunSummary { commands: 8, errors: 0 });
    assert_eq!(session.store().len(), 3);
    assert_eq!(session.store().latest().unwrap().date, fixed_today());

    // The lowered threshold flags the latest 27°C reading on the dashboard.
    assert!(out.contains("ALERT: Temperature 27°C is above the 26°C limit"));
    assert!(out.contains("2024-08-12"));

    let saved = dir.path().join("mushroom_growth_log.csv");
    let (_, rows) = read_csv(&std::fs::read_to_string(saved).unwrap());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].4, "inoculated, 5 jars");
    assert_eq!(rows[2].0, "2024-08-30");
    assert_eq!(rows[1].3, "Pinhead");
}

/// Settings from config.toml seed the session thresholds.
#[test]
fn e2e_config_seeds_session() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[alerts]\nmin_humidity = 90.0\n[export]\ndirectory = \"{}\"\n",
            dir.path().join("out").display().to_string().replace('\\', "/")
        ),
    )
    .unwrap();

    let (config, warnings) = load_config(&config_path);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    let mut session = GrowthSession::new(config.settings, config.export_dir);
    let mut out = Vec::new();
    run_session(
        &mut session,
        Cursor::new("add mature 22 88\nexport --format json\n"),
        &mut out,
        false,
        fixed_today,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("ALERT: Humidity 88% is below the 90% minimum"));

    let saved = dir.path().join("out").join("mushroom_growth_log.json");
    let json = std::fs::read_to_string(saved).unwrap();
    let parsed: Vec<GrowthLogRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, session.store().all());
}

/// Order is preserved through every view of the session.
#[test]
fn e2e_views_preserve_insertion_order() {
    let mut session = GrowthSession::new(Settings::default(), std::path::PathBuf::from("."));
    let script = "add harvested 20 85 --date 2024-05-20\n\
                  add mycelium 21 86 --date 2024-05-01\n\
                  add mature 22 87 --date 2024-05-10\n";
    run_session(&mut session, Cursor::new(script), &mut Vec::<u8>::new(), false, fixed_today).unwrap();

    let stages: Vec<GrowthStage> = session.store().all().iter().map(|r| r.stage).collect();
    assert_eq!(
        stages,
        vec![GrowthStage::Harvested, GrowthStage::Mycelium, GrowthStage::Mature]
    );

    let trend = session.trend();
    let dates: Vec<NaiveDate> = trend.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![date(2024, 5, 20), date(2024, 5, 1), date(2024, 5, 10)]);

    let artifact = session.build_export(ExportFormat::Csv).unwrap();
    let (_, rows) = read_csv(&artifact.contents);
    assert_eq!(rows[0].3, "Harvested");
    assert_eq!(rows[2].3, "Mature");
}

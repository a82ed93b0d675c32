// tests/cricket_dataset.rs
use std::path::PathBuf;

use statlab::analysis::BinningPolicy;
use statlab::config::Settings;
use statlab::file::{DatasetFileHandler, FileHandler};

fn cricket_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join("cricket.csv")
}

fn load() -> statlab::config::Dataset {
    DatasetFileHandler::new("sixes_hit")
        .with_group_column("team")
        .with_label_column("match_id")
        .load(&cricket_path())
        .unwrap()
}

#[test]
fn loads_every_innings() {
    let data = load();
    assert_eq!(data.name, "cricket");
    assert_eq!(data.len(), 40);
    assert_eq!(data.observations[0].label.as_deref(), Some("T20I-001"));
    assert_eq!(
        data.groups(),
        vec!["Australia", "England", "India", "New Zealand", "Pakistan", "South Africa", "West Indies"]
    );
}

#[test]
fn overall_report_uses_sturges() {
    let data = load();
    let settings = Settings::default();
    let report = data.report(settings.policy_for(false), true).unwrap();

    assert_eq!(report.statistics.mean, 9.5);
    assert_eq!(report.statistics.min, 4.0);
    assert_eq!(report.statistics.max, 18.0);
    // ceil(log2(40) + 1) = 7 bins of width 2
    assert_eq!(report.histogram.len(), 7);
    assert_eq!(report.histogram.bin_width(), 2.0);
    assert_eq!(report.histogram.counts().iter().sum::<usize>(), 40);
    assert_eq!(report.labels[0], "4.0-6.0");
    assert_eq!(report.histogram.overlay().map(|o| o.len()), Some(7));
}

#[test]
fn group_report_uses_square_root_floor() {
    let data = load();
    let report = data.group_report("India", &BinningPolicy::grouped(), false).unwrap();

    assert_eq!(report.name, "cricket / India");
    assert_eq!(report.statistics.count, 7);
    assert!((report.statistics.mean - 58.0 / 7.0).abs() < 1e-12);
    assert_eq!(report.statistics.median, 8.0);
    // ceil(sqrt(7)) = 3, raised to the minimum of 5
    assert_eq!(report.histogram.len(), 5);
    assert_eq!(report.histogram.total(), 7);
    assert!(report.histogram.overlay().is_none());
}

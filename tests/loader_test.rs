use crictui::error_display::{classify_report, LoadErrorKind};
use crictui::Dataset;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

fn write_csv(dir: &Path, name: &str, mut df: DataFrame) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(&mut df).unwrap();
    path
}

fn deliveries_df() -> DataFrame {
    df!(
        "batsman" => &["A", "A", "A", "B"],
        "season" => &[2018i64, 2019, 2018, 2018],
        "inning" => &[1i64, 1, 2, 1],
        "batsman_runs" => &[30i64, 45, 10, 12]
    )
    .unwrap()
}

fn top_df() -> DataFrame {
    df!(
        "batsman" => &["A"],
        "batsman_runs" => &[85i64]
    )
    .unwrap()
}

#[test]
fn load_reads_both_tables() {
    let dir = tempfile::tempdir().unwrap();
    let deliveries = write_csv(dir.path(), "ipl.csv", deliveries_df());
    let top = write_csv(dir.path(), "top10_score.csv", top_df());

    let dataset = Dataset::load(&deliveries, &top).unwrap();
    assert_eq!(dataset.deliveries.height(), 4);
    assert_eq!(dataset.top_scorers.height(), 1);
}

#[test]
fn load_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let deliveries = write_csv(dir.path(), "ipl.csv", deliveries_df());
    let top = write_csv(dir.path(), "top10_score.csv", top_df());

    let first = Dataset::load(&deliveries, &top).unwrap();
    let second = Dataset::load(&deliveries, &top).unwrap();
    assert!(first.deliveries.equals(&second.deliveries));
    assert!(first.top_scorers.equals(&second.top_scorers));
}

#[test]
fn missing_file_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let top = write_csv(dir.path(), "top10_score.csv", top_df());

    let report = Dataset::load(&dir.path().join("nope.csv"), &top).unwrap_err();
    assert_eq!(classify_report(&report), LoadErrorKind::SourceUnavailable);
}

#[test]
fn missing_column_is_schema_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let incomplete = df!(
        "batsman" => &["A"],
        "season" => &[2018i64],
        "batsman_runs" => &[30i64]
    )
    .unwrap();
    let deliveries = write_csv(dir.path(), "ipl.csv", incomplete);
    let top = write_csv(dir.path(), "top10_score.csv", top_df());

    let report = Dataset::load(&deliveries, &top).unwrap_err();
    assert_eq!(classify_report(&report), LoadErrorKind::SchemaMismatch);
}

#[test]
fn text_measure_is_schema_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let bad_top = df!(
        "batsman" => &["A"],
        "batsman_runs" => &["many"]
    )
    .unwrap();
    let deliveries = write_csv(dir.path(), "ipl.csv", deliveries_df());
    let top = write_csv(dir.path(), "top10_score.csv", bad_top);

    let report = Dataset::load(&deliveries, &top).unwrap_err();
    assert_eq!(classify_report(&report), LoadErrorKind::SchemaMismatch);
}

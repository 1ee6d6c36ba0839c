use crictui::aggregate::{
    batsman_names, innings_split, season_trend, TrendOutcome, FIRST_INNINGS, SECOND_INNINGS,
};
use crictui::chart_data::prepare_histogram;
use polars::prelude::*;

fn deliveries() -> DataFrame {
    df!(
        "batsman" => &["A", "A", "A", "B", "B", "C", "C"],
        "season" => &[2018i64, 2019, 2018, 2018, 2019, 2018, 2018],
        "inning" => &[1i64, 1, 2, 1, 2, 1, 1],
        "batsman_runs" => &[30i64, 45, 10, 12, 8, 50, 25]
    )
    .unwrap()
}

fn top() -> DataFrame {
    df!(
        "batsman" => &["A", "B", "C"],
        "batsman_runs" => &[85i64, 20, 75]
    )
    .unwrap()
}

fn extract_i64(df: &DataFrame, column: &str, row: usize) -> i64 {
    df.column(column).unwrap().get(row).unwrap().try_extract().unwrap()
}

#[test]
fn trend_matches_worked_example() {
    // Rows (A, 2018, 1, 30), (A, 2019, 1, 45), (A, 2018, 2, 10):
    // 2018 sums both innings, 2019 stands alone.
    let TrendOutcome::Series(points) = season_trend(&deliveries(), "A").unwrap() else {
        panic!("expected a series");
    };
    let seasons: Vec<&str> = points.iter().map(|p| p.season.as_str()).collect();
    let runs: Vec<f64> = points.iter().map(|p| p.runs).collect();
    assert_eq!(seasons, vec!["2018", "2019"]);
    assert_eq!(runs, vec![40.0, 45.0]);
}

#[test]
fn trend_covers_exactly_the_batsmans_seasons() {
    for name in batsman_names(&deliveries()).unwrap() {
        let TrendOutcome::Series(points) = season_trend(&deliveries(), &name).unwrap() else {
            panic!("every listed batsman has rows");
        };
        let expected = deliveries()
            .lazy()
            .filter(col("batsman").eq(lit(name.as_str())))
            .select([col("season").n_unique()])
            .collect()
            .unwrap();
        let n_seasons: u32 = expected
            .column("season")
            .unwrap()
            .get(0)
            .unwrap()
            .try_extract()
            .unwrap();
        assert_eq!(points.len(), n_seasons as usize);
    }
}

#[test]
fn innings_row_exists_iff_both_innings_present() {
    let table = innings_split(&deliveries(), &top()).unwrap();
    let names: Vec<String> = table
        .column("batsman")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .map(String::from)
        .collect();
    // A and B batted in both innings; C batted only in innings 1.
    assert!(names.contains(&"A".to_string()));
    assert!(names.contains(&"B".to_string()));
    assert!(!names.contains(&"C".to_string()));
    assert_eq!(table.height(), 2);
}

#[test]
fn innings_row_matches_worked_example() {
    let table = innings_split(&deliveries(), &top()).unwrap();
    let row = table
        .column("batsman")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .position(|v| v == Some("A"))
        .unwrap();
    assert_eq!(extract_i64(&table, FIRST_INNINGS, row), 75);
    assert_eq!(extract_i64(&table, SECOND_INNINGS, row), 10);
}

#[test]
fn innings_column_sums_match_raw_totals() {
    let table = innings_split(&deliveries(), &top()).unwrap();
    // C never appears in the table, so the column-sum identity holds over
    // batsmen with rows in both innings.
    let joined_names: Vec<String> = table
        .column("batsman")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .map(String::from)
        .collect();
    for (column, inning) in [(FIRST_INNINGS, 1i64), (SECOND_INNINGS, 2i64)] {
        let table_sum: i64 = (0..table.height())
            .map(|i| extract_i64(&table, column, i))
            .sum();
        let raw = deliveries()
            .lazy()
            .filter(col("inning").eq(lit(inning)))
            .collect()
            .unwrap();
        let mut raw_sum = 0i64;
        for i in 0..raw.height() {
            let name = raw
                .column("batsman")
                .unwrap()
                .get(i)
                .unwrap()
                .str_value()
                .to_string();
            if joined_names.contains(&name) {
                raw_sum += extract_i64(&raw, "batsman_runs", i);
            }
        }
        assert_eq!(table_sum, raw_sum, "column {}", column);
    }
}

#[test]
fn top_batsman_with_one_innings_only_is_absent() {
    let one_sided = df!(
        "batsman" => &["D", "D"],
        "season" => &[2018i64, 2019],
        "inning" => &[1i64, 1],
        "batsman_runs" => &[90i64, 80]
    )
    .unwrap();
    let top = df!(
        "batsman" => &["D"],
        "batsman_runs" => &[170i64]
    )
    .unwrap();
    let table = innings_split(&one_sided, &top).unwrap();
    assert_eq!(table.height(), 0);
}

#[test]
fn histograms_count_every_innings_row() {
    let table = innings_split(&deliveries(), &top()).unwrap();
    for column in [FIRST_INNINGS, SECOND_INNINGS] {
        let hist = prepare_histogram(&table, column, 20).unwrap();
        let counted: f64 = hist.bins.iter().map(|b| b.count).sum();
        assert_eq!(counted, table.height() as f64, "column {}", column);
    }
}

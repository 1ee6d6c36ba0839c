//! The computational core: trend, top-N membership, and innings split
//! aggregations over the loaded tables. Everything here consumes the
//! read-only frames and collects small derived tables at the edge.

use color_eyre::Result;
use polars::prelude::*;
use std::collections::HashSet;

/// Column label for 1st-innings run totals in the pivoted comparison table.
pub const FIRST_INNINGS: &str = "1st Innings";
/// Column label for 2nd-innings run totals in the pivoted comparison table.
pub const SECOND_INNINGS: &str = "2nd Innings";

/// One (season, total runs) point of a batsman's trend.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendPoint {
    pub season: String,
    pub runs: f64,
}

/// Typed outcome of the trend aggregation. An empty selection is a value,
/// not an error; the view renders a placeholder for it.
#[derive(Clone, Debug, PartialEq)]
pub enum TrendOutcome {
    Series(Vec<TrendPoint>),
    Empty,
}

/// Distinct batsman names in first-appearance order. Populates the
/// selection list; selection is constrained to this set.
pub fn batsman_names(deliveries: &DataFrame) -> Result<Vec<String>> {
    let column = deliveries.column("batsman")?.str()?;
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for name in column.into_iter().flatten() {
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Season-by-season run totals for one batsman. Matching is exact string
/// equality (no case or whitespace normalization). Season groups keep their
/// stored order, which the data records chronologically.
pub fn season_trend(deliveries: &DataFrame, batsman: &str) -> Result<TrendOutcome> {
    let df = deliveries
        .clone()
        .lazy()
        .filter(col("batsman").eq(lit(batsman)))
        .group_by_stable([col("season")])
        .agg([col("batsman_runs").sum()])
        .collect()?;

    if df.height() == 0 {
        return Ok(TrendOutcome::Empty);
    }

    let seasons = df.column("season")?;
    let runs = df.column("batsman_runs")?.cast(&DataType::Float64)?;
    let runs = runs.f64()?;

    let mut points = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        points.push(TrendPoint {
            season: seasons.get(i)?.str_value().to_string(),
            runs: runs.get(i).unwrap_or(0.0),
        });
    }
    Ok(TrendOutcome::Series(points))
}

/// Membership filter: keep only deliveries by batsmen named in the
/// reference table. Expressed as an inner join on the name column; rows for
/// anyone outside the set are deliberately dropped here, not downstream.
fn restrict_to_names(deliveries: LazyFrame, names: LazyFrame) -> LazyFrame {
    deliveries.join(
        names.select([col("batsman")]),
        [col("batsman")],
        [col("batsman")],
        JoinArgs::new(JoinType::Inner),
    )
}

/// Pivot 1st- and 2nd-innings run totals for the top scorers into one table:
/// (batsman, "1st Innings", "2nd Innings"). A batsman with deliveries in
/// only one of the two innings has no row — the inner join drops them
/// rather than zero-filling, and that behavior is kept on purpose.
pub fn innings_split(deliveries: &DataFrame, top_scorers: &DataFrame) -> Result<DataFrame> {
    let per_innings = restrict_to_names(deliveries.clone().lazy(), top_scorers.clone().lazy())
        .group_by_stable([col("batsman"), col("inning")])
        .agg([col("batsman_runs").sum()]);

    let first = per_innings
        .clone()
        .filter(col("inning").eq(lit(1)))
        .select([col("batsman"), col("batsman_runs").alias(FIRST_INNINGS)]);
    let second = per_innings
        .filter(col("inning").eq(lit(2)))
        .select([col("batsman"), col("batsman_runs").alias(SECOND_INNINGS)]);

    let table = first
        .join(
            second,
            [col("batsman")],
            [col("batsman")],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?;
    Ok(table)
}

/// First rows of the per-delivery table, for the overview pane.
pub fn preview(deliveries: &DataFrame, rows: usize) -> DataFrame {
    deliveries.head(Some(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deliveries() -> DataFrame {
        df!(
            "batsman" => &["A", "A", "A", "B", "B"],
            "season" => &[2018i64, 2019, 2018, 2018, 2018],
            "inning" => &[1i64, 1, 2, 1, 1],
            "batsman_runs" => &[30i64, 45, 10, 12, 8]
        )
        .unwrap()
    }

    #[test]
    fn names_are_distinct_in_first_appearance_order() {
        let names = batsman_names(&deliveries()).unwrap();
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn trend_sums_across_innings_per_season() {
        let outcome = season_trend(&deliveries(), "A").unwrap();
        let TrendOutcome::Series(points) = outcome else {
            panic!("expected a series");
        };
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].season, "2018");
        assert_eq!(points[0].runs, 40.0);
        assert_eq!(points[1].season, "2019");
        assert_eq!(points[1].runs, 45.0);
    }

    #[test]
    fn trend_for_unknown_name_is_empty() {
        assert_eq!(
            season_trend(&deliveries(), "Nobody").unwrap(),
            TrendOutcome::Empty
        );
    }

    #[test]
    fn trend_matching_is_exact() {
        // No case or whitespace normalization.
        assert_eq!(season_trend(&deliveries(), "a").unwrap(), TrendOutcome::Empty);
        assert_eq!(
            season_trend(&deliveries(), "A ").unwrap(),
            TrendOutcome::Empty
        );
    }

    #[test]
    fn innings_split_drops_single_innings_batsmen() {
        let top = df!(
            "batsman" => &["A", "B"],
            "batsman_runs" => &[85i64, 20]
        )
        .unwrap();
        let table = innings_split(&deliveries(), &top).unwrap();
        // B only ever batted in innings 1, so only A survives the join.
        assert_eq!(table.height(), 1);
        assert_eq!(
            table.column("batsman").unwrap().get(0).unwrap().str_value(),
            "A"
        );
        let first: i64 = table
            .column(FIRST_INNINGS)
            .unwrap()
            .get(0)
            .unwrap()
            .try_extract()
            .unwrap();
        let second: i64 = table
            .column(SECOND_INNINGS)
            .unwrap()
            .get(0)
            .unwrap()
            .try_extract()
            .unwrap();
        assert_eq!(first, 75);
        assert_eq!(second, 10);
    }

    #[test]
    fn innings_split_ignores_batsmen_outside_top_set() {
        let top = df!(
            "batsman" => &["B"],
            "batsman_runs" => &[20i64]
        )
        .unwrap();
        let table = innings_split(&deliveries(), &top).unwrap();
        assert_eq!(table.height(), 0);
    }

    #[test]
    fn preview_is_a_head() {
        let head = preview(&deliveries(), 3);
        assert_eq!(head.height(), 3);
        assert_eq!(head.width(), deliveries().width());
    }
}

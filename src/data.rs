//! Startup loading of the two input tables.
//!
//! Both CSVs are read exactly once, validated, and owned read-only by the
//! App for the rest of the process. A missing or malformed source is fatal;
//! the dashboard never starts on partial data.

use color_eyre::Result;
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Columns the per-delivery table must carry.
const DELIVERY_COLUMNS: &[&str] = &["batsman", "season", "inning", "batsman_runs"];
/// Columns the top-10 table must carry.
const TOP_COLUMNS: &[&str] = &["batsman", "batsman_runs"];

/// The two input tables. Immutable after load, so shared readers need no
/// locking.
#[derive(Clone, Debug)]
pub struct Dataset {
    /// Per-delivery match records.
    pub deliveries: DataFrame,
    /// Precomputed top-10 run scorers, in ranking order.
    pub top_scorers: DataFrame,
}

impl Dataset {
    /// Read and validate both CSVs. Re-running on the same files yields
    /// identical frames.
    pub fn load(deliveries: &Path, top_scorers: &Path) -> Result<Self> {
        let deliveries = read_csv(deliveries)?;
        let top_scorers = read_csv(top_scorers)?;
        validate_schema(&deliveries, DELIVERY_COLUMNS, &["inning", "batsman_runs"], "batsman")?;
        validate_schema(&top_scorers, TOP_COLUMNS, &["batsman_runs"], "batsman")?;
        Ok(Self {
            deliveries,
            top_scorers,
        })
    }
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    let pl_path = PlPath::Local(Arc::from(path));
    let df = LazyCsvReader::new(pl_path)
        .with_has_header(true)
        .finish()?
        .collect()?;
    Ok(df)
}

/// Check that required columns exist, that measure columns did not parse as
/// text, and that the name column did parse as text. Raised as
/// `PolarsError::SchemaMismatch` so `error_display` can classify it apart
/// from I/O failures.
fn validate_schema(df: &DataFrame, required: &[&str], numeric: &[&str], name: &str) -> Result<()> {
    for column in required {
        if df.column(column).is_err() {
            return Err(PolarsError::SchemaMismatch(
                format!("required column '{}' is missing", column).into(),
            )
            .into());
        }
    }
    for column in numeric {
        if let Ok(column) = df.column(column) {
            if matches!(column.dtype(), DataType::String) {
                return Err(PolarsError::SchemaMismatch(
                    format!("column '{}' must be numeric, found text", column.name()).into(),
                )
                .into());
            }
        }
    }
    if let Ok(column) = df.column(name) {
        if !matches!(column.dtype(), DataType::String) {
            return Err(PolarsError::SchemaMismatch(
                format!("column '{}' must be text, found {}", name, column.dtype()).into(),
            )
            .into());
        }
    }
    Ok(())
}

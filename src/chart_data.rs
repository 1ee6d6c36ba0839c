//! Convert the core's output tables into (f64, f64) point series and
//! histogram bins for the chart widgets.

use color_eyre::Result;
use polars::prelude::*;

use crate::aggregate::TrendPoint;

/// Default histogram bin count.
pub const DEFAULT_HIST_BINS: usize = 20;

/// Trend series as (index, runs) points plus season labels for axis ticks.
#[derive(Clone, Debug, Default)]
pub struct TrendSeries {
    pub points: Vec<(f64, f64)>,
    pub labels: Vec<String>,
    pub y_max: f64,
}

/// Lay a trend out on an ordinal x axis: point i sits at x = i, labeled with
/// its season. Seasons are opaque ordinal labels ("2018", "2007/08"), so no
/// numeric parsing is attempted.
pub fn trend_points(trend: &[TrendPoint]) -> TrendSeries {
    let mut series = TrendSeries::default();
    for (i, point) in trend.iter().enumerate() {
        series.points.push((i as f64, point.runs));
        series.labels.push(point.season.clone());
        series.y_max = series.y_max.max(point.runs);
    }
    series
}

/// Bar chart series from the top-10 table, in table (ranking) order.
#[derive(Clone, Debug, Default)]
pub struct BarSeries {
    pub points: Vec<(f64, f64)>,
    pub labels: Vec<String>,
    pub y_max: f64,
}

pub fn bar_points(top_scorers: &DataFrame) -> Result<BarSeries> {
    let names = top_scorers.column("batsman")?;
    let runs = top_scorers.column("batsman_runs")?.cast(&DataType::Float64)?;
    let runs = runs.f64()?;

    let mut series = BarSeries::default();
    for i in 0..top_scorers.height() {
        let total = runs.get(i).unwrap_or(0.0);
        series.points.push((i as f64, total));
        series.labels.push(names.get(i)?.str_value().to_string());
        series.y_max = series.y_max.max(total);
    }
    Ok(series)
}

/// One histogram bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramBin {
    pub center: f64,
    pub count: f64,
}

/// Equal-width histogram of one numeric column.
#[derive(Clone, Debug)]
pub struct HistogramData {
    pub column: String,
    pub bins: Vec<HistogramBin>,
    pub x_min: f64,
    pub x_max: f64,
    pub max_count: f64,
}

/// Bucket a numeric column into `bins` equal-width buckets. Nulls and
/// non-finite values are dropped. An empty column (or zero bins) yields no
/// buckets; the widget renders a placeholder for that.
pub fn prepare_histogram(df: &DataFrame, column: &str, bins: usize) -> Result<HistogramData> {
    let values = df.column(column)?.cast(&DataType::Float64)?;
    let values = values.f64()?;
    let xs: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();

    if xs.is_empty() || bins == 0 {
        return Ok(HistogramData {
            column: column.to_string(),
            bins: Vec::new(),
            x_min: 0.0,
            x_max: 1.0,
            max_count: 0.0,
        });
    }

    let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if x_max > x_min { x_max - x_min } else { 1.0 };
    let width = span / bins as f64;

    let mut counts = vec![0.0_f64; bins];
    for v in &xs {
        let idx = (((v - x_min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1.0;
    }

    let mut max_count = 0.0_f64;
    let mut out = Vec::with_capacity(bins);
    for (i, count) in counts.into_iter().enumerate() {
        max_count = max_count.max(count);
        out.push(HistogramBin {
            center: x_min + (i as f64 + 0.5) * width,
            count,
        });
    }

    Ok(HistogramData {
        column: column.to_string(),
        bins: out,
        x_min,
        x_max: x_min + span,
        max_count,
    })
}

/// Format a numeric axis tick.
pub fn format_axis_label(v: f64) -> String {
    if v.abs() >= 1e6 || (v.abs() < 1e-2 && v != 0.0) {
        format!("{:.2e}", v)
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

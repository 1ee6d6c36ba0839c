//! Chart rendering: the trend line, the top-10 bar chart, and the innings
//! run-distribution histograms.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

use crate::chart_data::{format_axis_label, BarSeries, HistogramData, TrendSeries};
use crate::config::Theme;

/// Centered placeholder for panes with nothing to draw.
pub fn render_placeholder(area: Rect, buf: &mut Buffer, message: &str, theme: &Theme) {
    Paragraph::new(message)
        .style(Style::default().fg(theme.get("text_secondary")))
        .centered()
        .render(area, buf);
}

fn label_spans<'a>(labels: &'a [String], style: Style) -> Vec<Span<'a>> {
    match labels.len() {
        0 => vec![],
        1 => vec![Span::styled(labels[0].as_str(), style)],
        n => vec![
            Span::styled(labels[0].as_str(), style),
            Span::styled(labels[n / 2].as_str(), style),
            Span::styled(labels[n - 1].as_str(), style),
        ],
    }
}

fn numeric_label_spans(min: f64, max: f64, style: Style) -> Vec<Span<'static>> {
    vec![
        Span::styled(format_axis_label(min), style),
        Span::styled(format_axis_label((min + max) / 2.0), style),
        Span::styled(format_axis_label(max), style),
    ]
}

/// Season-by-season run trend for the selected batsman: a line over an
/// ordinal x axis labeled with seasons.
pub fn render_trend_chart(
    area: Rect,
    buf: &mut Buffer,
    series: &TrendSeries,
    batsman: &str,
    theme: &Theme,
) {
    if series.points.is_empty() {
        render_placeholder(area, buf, "No recorded deliveries for this batsman", theme);
        return;
    }

    let axis_style = Style::default().fg(theme.get("text_primary"));
    let x_max = (series.points.len() as f64 - 1.0).max(0.5);
    let y_max = if series.y_max > 0.0 { series.y_max } else { 1.0 };

    let x_axis = Axis::default()
        .title("Season")
        .bounds([0.0, x_max])
        .style(axis_style)
        .labels(label_spans(&series.labels, axis_style));
    let y_axis = Axis::default()
        .title("Total Runs")
        .bounds([0.0, y_max])
        .style(axis_style)
        .labels(numeric_label_spans(0.0, y_max, axis_style));

    let dataset = Dataset::default()
        .name(batsman)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.get("trend_series")))
        .data(&series.points);

    Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.get("border")))
                .title(format!(" {} season by season ", batsman)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis)
        .render(area, buf);
}

/// Top-10 career totals as bars on an ordinal x axis labeled with names.
pub fn render_bar_chart(area: Rect, buf: &mut Buffer, series: &BarSeries, theme: &Theme) {
    if series.points.is_empty() {
        render_placeholder(area, buf, "No ranking data", theme);
        return;
    }

    let axis_style = Style::default().fg(theme.get("text_primary"));
    let x_max = (series.points.len() as f64 - 1.0).max(0.5);
    let y_max = if series.y_max > 0.0 { series.y_max } else { 1.0 };

    let x_axis = Axis::default()
        .title("Batsman")
        .bounds([0.0, x_max])
        .style(axis_style)
        .labels(label_spans(&series.labels, axis_style));
    let y_axis = Axis::default()
        .title("Total Runs")
        .bounds([0.0, y_max])
        .style(axis_style)
        .labels(numeric_label_spans(0.0, y_max, axis_style));

    let dataset = Dataset::default()
        .name("")
        .marker(symbols::Marker::HalfBlock)
        .graph_type(GraphType::Bar)
        .style(Style::default().fg(theme.get("bar_series")))
        .data(&series.points);

    Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.get("border")))
                .title(" Top 10 run scorers "),
        )
        .x_axis(x_axis)
        .y_axis(y_axis)
        .render(area, buf);
}

/// One innings run-distribution histogram. `series_color_key` selects the
/// theme color so the two innings panes keep their distinct colors.
pub fn render_histogram_chart(
    area: Rect,
    buf: &mut Buffer,
    data: &HistogramData,
    series_color_key: &str,
    theme: &Theme,
) {
    if data.bins.is_empty() {
        render_placeholder(area, buf, "No data for histogram", theme);
        return;
    }

    let points: Vec<(f64, f64)> = data.bins.iter().map(|b| (b.center, b.count)).collect();

    let x_min_bounds = data.x_min;
    let x_max_bounds = if data.x_max > data.x_min {
        data.x_max
    } else {
        data.x_min + 1.0
    };
    let y_max_bounds = if data.max_count > 0.0 {
        data.max_count
    } else {
        1.0
    };

    let axis_style = Style::default().fg(theme.get("text_primary"));
    let x_axis = Axis::default()
        .title("Runs")
        .bounds([x_min_bounds, x_max_bounds])
        .style(axis_style)
        .labels(numeric_label_spans(x_min_bounds, x_max_bounds, axis_style));
    let y_axis = Axis::default()
        .title("Frequency")
        .bounds([0.0, y_max_bounds])
        .style(axis_style)
        .labels(numeric_label_spans(0.0, y_max_bounds, axis_style));

    let dataset = Dataset::default()
        .name("")
        .marker(symbols::Marker::HalfBlock)
        .graph_type(GraphType::Bar)
        .style(Style::default().fg(theme.get(series_color_key)))
        .data(&points);

    Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.get("border")))
                .title(format!(" {} runs distribution ", data.column)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis)
        .render(area, buf);
}

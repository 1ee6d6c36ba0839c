//! Slim DataFrame table rendering: headers plus `str_value`-formatted cells.

use polars::prelude::*;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use crate::config::Theme;

/// Render a DataFrame as a bordered table. Rows beyond what fits the area
/// are simply not drawn; the dashboard's derived tables are all small.
pub fn render_dataframe(area: Rect, buf: &mut Buffer, df: &DataFrame, title: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.get("border")))
        .title(format!(" {} ", title));

    if df.width() == 0 || df.height() == 0 {
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new("No rows")
            .style(Style::default().fg(theme.get("text_secondary")))
            .centered()
            .render(inner, buf);
        return;
    }

    let columns = df.get_columns();
    let header = Row::new(
        columns
            .iter()
            .map(|c| Cell::from(c.name().to_string()))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(theme.get("table_header"))
            .bg(theme.get("table_header_bg")),
    );

    // Rows that fit: area minus borders and the header row.
    let visible = area.height.saturating_sub(3) as usize;
    let mut rows = Vec::with_capacity(df.height().min(visible));
    for i in 0..df.height().min(visible) {
        let cells = columns
            .iter()
            .map(|c| {
                let text = match c.get(i) {
                    Ok(AnyValue::Null) | Err(_) => String::new(),
                    Ok(v) => v.str_value().to_string(),
                };
                Cell::from(text)
            })
            .collect::<Vec<_>>();
        rows.push(Row::new(cells));
    }

    let widths = vec![Constraint::Fill(1); columns.len()];
    let table = Table::new(rows, widths)
        .header(header)
        .style(Style::default().fg(theme.get("text_primary")))
        .block(block);
    Widget::render(table, area, buf);
}

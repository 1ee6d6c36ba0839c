//! Controls footer: a single line of keybind hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::config::Theme;

const BINDINGS: &[(&str, &str)] = &[
    ("q", "Quit"),
    ("Tab/←→", "View"),
    ("↑↓", "Batsman"),
];

pub fn render_controls(area: Rect, buf: &mut Buffer, theme: &Theme) {
    let hint_style = Style::default().fg(theme.get("keybind_hints"));
    let label_style = Style::default().fg(theme.get("keybind_labels"));

    let mut spans = Vec::with_capacity(BINDINGS.len() * 3);
    for (key, label) in BINDINGS {
        spans.push(Span::styled(format!(" {} ", key), hint_style));
        spans.push(Span::styled(*label, label_style));
        spans.push(Span::raw("  "));
    }

    Paragraph::new(Line::from(spans))
        .style(Style::default().bg(theme.get("controls_bg")))
        .render(area, buf);
}

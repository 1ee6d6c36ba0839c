use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use polars::prelude::DataFrame;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Tabs, Widget},
};

pub mod aggregate;
pub mod chart_data;
pub mod cli;
pub mod config;
pub mod data;
pub mod error_display;
pub mod widgets;

pub use cli::Args;
pub use config::{rgb_to_256_color, rgb_to_basic_ansi, AppConfig, ColorParser, ConfigManager, Theme};
pub use data::Dataset;

use aggregate::{TrendOutcome, FIRST_INNINGS, SECOND_INNINGS};
use chart_data::{bar_points, prepare_histogram, trend_points, BarSeries, HistogramData};
use error_display::user_message_from_report;
use widgets::chart::{
    render_bar_chart, render_histogram_chart, render_placeholder, render_trend_chart,
};
use widgets::controls::render_controls;
use widgets::datatable::render_dataframe;

/// Application name used for the config directory and other app-specific paths
pub const APP_NAME: &str = "crictui";

const SELECTOR_WIDTH: u16 = 28;
const TAB_HEIGHT: u16 = 3;

/// The dashboard's fixed views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Overview,
    Trend,
    TopTen,
    Innings,
    Distribution,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Overview,
        View::Trend,
        View::TopTen,
        View::Innings,
        View::Distribution,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Trend => "Trend",
            View::TopTen => "Top 10",
            View::Innings => "Innings",
            View::Distribution => "Distribution",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|&v| v == self).unwrap_or(0)
    }

    fn next(self) -> View {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> View {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Events handled by the application loop.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Exit,
}

/// Application state: the immutable loaded tables, the derived tables
/// computed once at startup, and the per-selection trend.
pub struct App {
    dataset: Dataset,
    theme: Theme,
    preview: DataFrame,
    batsmen: Vec<String>,
    selected: usize,
    list_state: ListState,
    pub view: View,
    pub trend: TrendOutcome,
    pub trend_error: Option<String>,
    bar_series: BarSeries,
    pub innings: DataFrame,
    first_hist: HistogramData,
    second_hist: HistogramData,
}

impl App {
    /// Compute every static data product up front; only the trend is
    /// recomputed afterwards, on each selection change.
    pub fn new(
        dataset: Dataset,
        config: &AppConfig,
        theme: Theme,
        initial_batsman: Option<&str>,
        hist_bins: usize,
    ) -> Result<Self> {
        let preview = aggregate::preview(&dataset.deliveries, config.display.preview_rows);
        let batsmen = aggregate::batsman_names(&dataset.deliveries)?;

        // Selection is constrained to names present in the data.
        let selected = match initial_batsman {
            Some(name) => batsmen
                .iter()
                .position(|b| b == name)
                .ok_or_else(|| eyre!("batsman '{}' not found in the delivery data", name))?,
            None => 0,
        };

        let bar_series = bar_points(&dataset.top_scorers)?;
        let innings = aggregate::innings_split(&dataset.deliveries, &dataset.top_scorers)?;
        let first_hist = prepare_histogram(&innings, FIRST_INNINGS, hist_bins)?;
        let second_hist = prepare_histogram(&innings, SECOND_INNINGS, hist_bins)?;

        let mut list_state = ListState::default();
        if !batsmen.is_empty() {
            list_state.select(Some(selected));
        }

        let mut app = Self {
            dataset,
            theme,
            preview,
            batsmen,
            selected,
            list_state,
            view: View::Overview,
            trend: TrendOutcome::Empty,
            trend_error: None,
            bar_series,
            innings,
            first_hist,
            second_hist,
        };
        app.recompute_trend();
        Ok(app)
    }

    pub fn selected_batsman(&self) -> Option<&str> {
        self.batsmen.get(self.selected).map(String::as_str)
    }

    /// Recompute the trend for the current selection. An empty result is a
    /// normal outcome; a residual computation failure is shown in the trend
    /// pane only, never escalated.
    fn recompute_trend(&mut self) {
        let Some(batsman) = self.selected_batsman() else {
            self.trend = TrendOutcome::Empty;
            self.trend_error = None;
            return;
        };
        match aggregate::season_trend(&self.dataset.deliveries, batsman) {
            Ok(outcome) => {
                self.trend = outcome;
                self.trend_error = None;
            }
            Err(report) => {
                self.trend = TrendOutcome::Empty;
                self.trend_error = Some(user_message_from_report(&report, None));
            }
        }
    }

    fn select_offset(&mut self, delta: isize) {
        if self.batsmen.is_empty() {
            return;
        }
        let last = self.batsmen.len() as isize - 1;
        let next = (self.selected as isize + delta).clamp(0, last) as usize;
        if next != self.selected {
            self.selected = next;
            self.list_state.select(Some(next));
            self.recompute_trend();
        }
    }

    /// Handle one event; returns a follow-up event when the loop should act
    /// on it (currently only Exit).
    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        match event {
            AppEvent::Key(key) => self.key(key),
            AppEvent::Resize(_, _) => None,
            AppEvent::Exit => None,
        }
    }

    fn key(&mut self, key: &KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(AppEvent::Exit),
            KeyCode::Tab | KeyCode::Right => self.view = self.view.next(),
            KeyCode::BackTab | KeyCode::Left => self.view = self.view.prev(),
            KeyCode::Up => self.select_offset(-1),
            KeyCode::Down => self.select_offset(1),
            _ => {}
        }
        None
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer) {
        let titles: Vec<Line> = View::ALL
            .iter()
            .map(|v| Line::from(Span::raw(v.title())))
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.get("border")))
            .title(" crictui ");
        Tabs::new(titles)
            .block(block)
            .select(self.view.position())
            .style(Style::default().fg(self.theme.get("text_secondary")))
            .highlight_style(
                Style::default()
                    .fg(self.theme.get("border_active"))
                    .add_modifier(Modifier::BOLD),
            )
            .render(area, buf);
    }

    fn render_overview(&mut self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SELECTOR_WIDTH), Constraint::Fill(1)])
            .split(area);

        let items: Vec<ListItem> = self
            .batsmen
            .iter()
            .map(|name| ListItem::new(name.as_str()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.get("border")))
                    .title(" Batsman "),
            )
            .style(Style::default().fg(self.theme.get("text_primary")))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        StatefulWidget::render(list, layout[0], buf, &mut self.list_state);

        render_dataframe(
            layout[1],
            buf,
            &self.preview,
            "Deliveries (first rows)",
            &self.theme,
        );
    }

    fn render_trend(&self, area: Rect, buf: &mut Buffer) {
        if let Some(message) = &self.trend_error {
            Paragraph::new(message.as_str())
                .style(Style::default().fg(self.theme.get("error")))
                .centered()
                .render(area, buf);
            return;
        }
        let batsman = self.selected_batsman().unwrap_or("");
        match &self.trend {
            TrendOutcome::Series(points) => {
                let series = trend_points(points);
                render_trend_chart(area, buf, &series, batsman, &self.theme);
            }
            TrendOutcome::Empty => {
                render_placeholder(
                    area,
                    buf,
                    "No recorded deliveries for this batsman",
                    &self.theme,
                );
            }
        }
    }

    fn render_distribution(&self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        render_histogram_chart(
            layout[0],
            buf,
            &self.first_hist,
            "first_innings_series",
            &self.theme,
        );
        render_histogram_chart(
            layout[1],
            buf,
            &self.second_hist,
            "second_innings_series",
            &self.theme,
        );
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TAB_HEIGHT),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_tabs(layout[0], buf);

        match self.view {
            View::Overview => self.render_overview(layout[1], buf),
            View::Trend => self.render_trend(layout[1], buf),
            View::TopTen => render_bar_chart(layout[1], buf, &self.bar_series, &self.theme),
            View::Innings => render_dataframe(
                layout[1],
                buf,
                &self.innings,
                "1st vs 2nd innings, top 10 batsmen",
                &self.theme,
            ),
            View::Distribution => self.render_distribution(layout[1], buf),
        }

        render_controls(layout[2], buf, &self.theme);
    }
}

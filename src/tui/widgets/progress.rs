use super::{ACCENT, DUR_WIDTH, TEXT_FADED};
use crate::player::PlayerView;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    symbols,
    text::Text,
    widgets::{LineGauge, Widget},
};

/// Elapsed time, progress fill and total time on one row.
pub struct Progress<'a> {
    view: &'a PlayerView,
}

impl<'a> Progress<'a> {
    pub fn new(view: &'a PlayerView) -> Self {
        Progress { view }
    }
}

impl Widget for Progress<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [elapsed, _, gauge, _, total] = Layout::horizontal([
            Constraint::Length(DUR_WIDTH + 1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(DUR_WIDTH + 1),
        ])
        .areas(area);

        Text::from(self.view.elapsed.as_str())
            .fg(TEXT_FADED)
            .right_aligned()
            .render(elapsed, buf);

        Text::from(self.view.total.as_str())
            .fg(TEXT_FADED)
            .left_aligned()
            .render(total, buf);

        // LineGauge rejects ratios outside 0..=1
        let ratio = (self.view.progress_percent / 100.0).clamp(0.0, 1.0);

        LineGauge::default()
            .filled_style(Style::new().fg(ACCENT))
            .unfilled_style(Style::new().fg(TEXT_FADED))
            .filled_symbol(symbols::line::THICK_HORIZONTAL)
            .unfilled_symbol(symbols::line::HORIZONTAL)
            .label("")
            .ratio(ratio)
            .render(gauge, buf);
    }
}

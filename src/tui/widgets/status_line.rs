use crate::ui_state::UiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Stylize},
    text::Line,
    widgets::{StatefulWidget, Widget},
};

/// The last user-facing error, cleared by the next key press.
pub struct StatusLine;

impl StatefulWidget for StatusLine {
    type State = UiState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if let Some(status) = state.get_status() {
            Line::from(format!(" {status}"))
                .fg(Color::LightRed)
                .render(area, buf);
        }
    }
}

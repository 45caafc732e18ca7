use super::{AppLayout, PlayerPanel, StatusLine, TrackList};
use crate::ui_state::UiState;
use ratatui::{Frame, widgets::StatefulWidget};

pub fn render(f: &mut Frame, state: &mut UiState) {
    let layout = AppLayout::new(f.area(), state);

    TrackList.render(layout.track_list, f.buffer_mut(), state);
    PlayerPanel.render(layout.player_panel, f.buffer_mut(), state);
    StatusLine.render(layout.status_line, f.buffer_mut(), state);
}

use crate::ui_state::UiState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

const PANEL_HEIGHT_MOBILE: u16 = 5;
const PANEL_HEIGHT_DESKTOP: u16 = 12;

pub struct AppLayout {
    pub track_list: Rect,
    pub player_panel: Rect,
    pub status_line: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, state: &UiState) -> Self {
        let view = state.player.view();

        // A hidden panel collapses to its one-line toggle affordance
        let panel_height = match (view.panel_active, view.panel_hidden) {
            (false, _) => 0,
            (true, true) => 1,
            (true, false) => match state.player.is_mobile() {
                true => PANEL_HEIGHT_MOBILE,
                false => PANEL_HEIGHT_DESKTOP.min(area.height / 2).max(PANEL_HEIGHT_MOBILE),
            },
        };

        let status_height = match state.get_status().is_some() {
            true => 1,
            false => 0,
        };

        let [track_list, player_panel, status_line] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(panel_height),
                Constraint::Length(status_height),
            ])
            .areas(area);

        AppLayout {
            track_list,
            player_panel,
            status_line,
        }
    }
}

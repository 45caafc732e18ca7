use crate::{key_handler::Director, player::PlayerController};
use anyhow::Error;
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    QUIT,
}

pub struct UiState {
    pub(crate) player: PlayerController,
    pub(crate) table_pos: ListState,
    mode: Mode,
    status: Option<String>,
}

impl UiState {
    /// The list selection starts on the current track, if any.
    pub fn new(player: PlayerController) -> Self {
        let selected = match player.tracks().is_empty() {
            true => None,
            false => Some(player.current_index().unwrap_or(0)),
        };

        UiState {
            player,
            table_pos: ListState::default().with_selected(selected),
            mode: Mode::Running,
            status: None,
        }
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode
    }

    pub fn set_error(&mut self, e: Error) {
        log::warn!("{e:#}");
        self.status = Some(e.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn get_status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn get_selected(&self) -> Option<usize> {
        self.table_pos.selected()
    }

    pub fn scroll(&mut self, director: Director) {
        let len = self.player.tracks().len();
        if len == 0 {
            return;
        }

        let current = self.table_pos.selected().unwrap_or(0);
        let new_pos = match director {
            Director::Up(x) => (current + len - (x % len)) % len,
            Director::Down(x) => (current + x) % len,
            Director::Top => 0,
            Director::Bottom => len - 1,
        };

        self.table_pos.select(Some(new_pos));
    }

    /// Keep the selection on the playing track after next/previous.
    pub fn follow_current(&mut self) {
        if let Some(idx) = self.player.current_index() {
            self.table_pos.select(Some(idx));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Track,
        player::fake::FakeEngine,
        store::MemoryStore,
        viewport::BreakpointClassifier,
    };

    fn ui_with(count: usize) -> UiState {
        let mut player = PlayerController::new(
            Box::new(FakeEngine::new()),
            Box::new(MemoryStore::new()),
            Box::new(BreakpointClassifier::default()),
            1024,
            8,
        );
        let tracks = (0..count)
            .map(|i| Track::new(format!("/m/{i}.mp3"), format!("Track {i}")))
            .collect();
        player.restore_on_load(tracks);

        UiState::new(player)
    }

    #[test]
    fn scrolling_wraps_both_ways() {
        let mut ui = ui_with(4);
        assert_eq!(ui.get_selected(), Some(0));

        ui.scroll(Director::Up(1));
        assert_eq!(ui.get_selected(), Some(3));

        ui.scroll(Director::Down(2));
        assert_eq!(ui.get_selected(), Some(1));

        ui.scroll(Director::Bottom);
        assert_eq!(ui.get_selected(), Some(3));
        ui.scroll(Director::Top);
        assert_eq!(ui.get_selected(), Some(0));
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut ui = ui_with(0);
        ui.scroll(Director::Down(1));
        assert_eq!(ui.get_selected(), None);
    }

    #[test]
    fn selection_follows_the_player() {
        let mut ui = ui_with(3);
        ui.player.load_track(1).unwrap();
        ui.player.next();

        ui.follow_current();

        assert_eq!(ui.get_selected(), Some(2));
    }
}

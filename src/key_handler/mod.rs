mod action;

pub use action::handle_key_event;
pub use action::next_event;

use ratatui::crossterm::event::KeyModifiers;

const X: KeyModifiers = KeyModifiers::NONE;
const S: KeyModifiers = KeyModifiers::SHIFT;
const C: KeyModifiers = KeyModifiers::CONTROL;

/// Share of the track skipped by a small seek step.
const SEEK_SMALL: f64 = 0.05;
const SEEK_LARGE: f64 = 0.20;
const SCROLL_MID: usize = 5;

#[derive(Debug, PartialEq)]
pub enum Action {
    // Player Controls
    LoadSelected,
    TogglePause,
    Stop,
    Restart,
    ToggleRepeat,
    PlayNext,
    PlayPrev,
    /// Jump to a fraction of the track.
    SeekTo(f64),
    /// Move by a signed fraction of the track.
    SeekBy(f64),

    // Display
    TogglePanel,
    Scroll(Director),

    QUIT,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Director {
    Up(usize),
    Down(usize),
    Top,
    Bottom,
}

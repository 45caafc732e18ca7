use crate::{REFRESH_RATE, key_handler::*};
use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent};

use KeyCode::*;

pub fn handle_key_event(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (C, Char('c')) | (X, Char('q')) => Some(Action::QUIT),

        // PLAYBACK COMMANDS
        (X, Enter) => Some(Action::LoadSelected),
        (X, Char(' ')) => Some(Action::TogglePause),
        (X, Char('s')) => Some(Action::Stop),
        (X, Char('r')) => Some(Action::Restart),
        (X, Char('t')) => Some(Action::ToggleRepeat),
        (X, Char('n')) => Some(Action::PlayNext),
        (X, Char('p')) => Some(Action::PlayPrev),

        (X, Right) | (X, Char('l')) => Some(Action::SeekBy(SEEK_SMALL)),
        (X, Left) | (X, Char('h')) => Some(Action::SeekBy(-SEEK_SMALL)),
        (S, Right) | (S, Char('L')) => Some(Action::SeekBy(SEEK_LARGE)),
        (S, Left) | (S, Char('H')) => Some(Action::SeekBy(-SEEK_LARGE)),

        // `0` is the start, `9` is 90% in
        (X, Char(d @ '0'..='9')) => d
            .to_digit(10)
            .map(|d| Action::SeekTo(f64::from(d) / 10.0)),

        // DISPLAY
        (X, Tab) | (X, Char('v')) => Some(Action::TogglePanel),

        // SCROLLING
        (X, Char('j')) | (X, Down) => Some(Action::Scroll(Director::Down(1))),
        (X, Char('k')) | (X, Up) => Some(Action::Scroll(Director::Up(1))),
        (X, Char('d')) | (X, PageDown) => Some(Action::Scroll(Director::Down(SCROLL_MID))),
        (X, Char('u')) | (X, PageUp) => Some(Action::Scroll(Director::Up(SCROLL_MID))),
        (X, Char('g')) | (X, Home) => Some(Action::Scroll(Director::Top)),
        (S, Char('G')) | (X, End) => Some(Action::Scroll(Director::Bottom)),

        _ => None,
    }
}

pub fn next_event() -> Result<Option<Event>> {
    match event::poll(REFRESH_RATE)? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}

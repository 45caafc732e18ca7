use super::{ACCENT, TEXT_FADED};
use crate::player::{ArtworkView, SpinState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Stylize,
    text::{Line, Span},
    widgets::Widget,
};
use std::path::Path;

const DISC_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
const DISC_IDLE: &str = "◉";

/// The artwork as a record that turns while playing.
pub struct Artwork<'a> {
    artwork: &'a ArtworkView,
}

impl<'a> Artwork<'a> {
    pub fn new(artwork: &'a ArtworkView) -> Self {
        Artwork { artwork }
    }
}

fn disc_frame(artwork: &ArtworkView) -> &'static str {
    match artwork.spin {
        SpinState::Idle => DISC_IDLE,
        SpinState::Spinning | SpinState::Frozen => {
            let frame = (artwork.angle.rem_euclid(360.0) / 90.0) as usize;
            DISC_FRAMES[frame.min(DISC_FRAMES.len() - 1)]
        }
    }
}

impl Widget for Artwork<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = Path::new(&self.artwork.src)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.artwork.src.clone());

        Line::from_iter([
            Span::from(disc_frame(self.artwork)).fg(ACCENT),
            Span::from(format!(" {label}")).fg(TEXT_FADED),
        ])
        .right_aligned()
        .render(area, buf);
    }
}

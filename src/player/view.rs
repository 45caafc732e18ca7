use super::Visualizer;
use crate::format_time;
use std::time::Duration;

/// Degrees per second of a spinning artwork disc.
const SPIN_SPEED: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayGlyph {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    Idle,
    Spinning,
    Frozen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkView {
    pub src: String,
    pub spin: SpinState,
    pub angle: f32,
}

impl ArtworkView {
    pub fn new(src: impl Into<String>) -> Self {
        ArtworkView {
            src: src.into(),
            spin: SpinState::Idle,
            angle: 0.0,
        }
    }
}

/// Everything the player panel displays.
pub struct PlayerView {
    pub glyph: PlayGlyph,
    pub track_name: String,
    pub elapsed: String,
    pub total: String,
    pub progress_percent: f64,
    pub artwork: Option<ArtworkView>,
    pub visualizer: Option<Visualizer>,
    pub repeat_enabled: bool,
    /// A track has been loaded at some point, so the panel exists.
    pub panel_active: bool,
    pub panel_hidden: bool,
}

impl Default for PlayerView {
    fn default() -> Self {
        PlayerView {
            glyph: PlayGlyph::Play,
            track_name: String::new(),
            elapsed: format_time(0.0),
            total: format_time(0.0),
            progress_percent: 0.0,
            artwork: None,
            visualizer: None,
            repeat_enabled: false,
            panel_active: false,
            panel_hidden: true,
        }
    }
}

impl PlayerView {
    pub fn toggle_label(&self) -> &'static str {
        match self.panel_hidden {
            true => "Show Player",
            false => "Hide Player",
        }
    }

    pub fn set_time(&mut self, position: Duration, duration: Option<Duration>) {
        self.elapsed = format_time(position.as_secs_f64());

        match duration.filter(|d| !d.is_zero()) {
            Some(total) => {
                self.total = format_time(total.as_secs_f64());
                let ratio = position.as_secs_f64() / total.as_secs_f64();
                self.progress_percent = (ratio * 100.0).clamp(0.0, 100.0);
            }
            None => self.progress_percent = 0.0,
        }
    }

    pub fn reset_time(&mut self) {
        self.elapsed = format_time(0.0);
        self.progress_percent = 0.0;
    }

    pub fn set_spin(&mut self, spin: SpinState) {
        if let Some(artwork) = self.artwork.as_mut() {
            artwork.spin = spin;
        }
    }

    pub fn spin(&self) -> Option<SpinState> {
        self.artwork.as_ref().map(|a| a.spin)
    }

    pub fn advance(&mut self, dt: Duration) {
        if let Some(artwork) = self.artwork.as_mut() {
            if artwork.spin == SpinState::Spinning {
                artwork.angle = (artwork.angle + SPIN_SPEED * dt.as_secs_f32()) % 360.0;
            }
        }

        if let Some(vis) = self.visualizer.as_mut() {
            vis.advance(dt);
        }
    }
}

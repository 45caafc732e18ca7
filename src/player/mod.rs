mod backend_rodio;
mod controller;
mod core;
mod engine;
mod error;
mod handle;
mod metrics;
mod state;
mod view;
mod visualizer;

#[cfg(test)]
pub(crate) mod fake;

pub use controller::{PlaybackStatus, PlayerController};
pub use engine::{EngineEvent, MediaEngine, PlayTicket};
pub use error::{EngineError, PlayerError};
pub use handle::RodioEngine;
pub use metrics::PlaybackMetrics;
pub use state::{NO_TRACK, PlayerState};
pub use view::{ArtworkView, PlayGlyph, PlayerView, SpinState};
pub use visualizer::{Bar, MAX_BAR_HEIGHT, MIN_BAR_HEIGHT, Visualizer};

use std::{path::PathBuf, time::Duration};

pub(crate) enum PlayerCommand {
    Load(PathBuf),
    Play(PlayTicket),
    Pause,
    Seek(Duration),
    Shutdown,
}

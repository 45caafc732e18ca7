use std::time::Duration;

/// Identifies one start request so its outcome can be matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Enough of the loaded source is available to seek and play.
    Ready,
    DurationKnown(Duration),
    PlayStarted(PlayTicket),
    /// The host refused to start playback.
    PlayRefused(PlayTicket, String),
    Ended,
}

/// The host capability that decodes and renders audio.
///
/// Every call returns immediately. The outcome of `play` is reported
/// later through `poll_events` as `PlayStarted` or `PlayRefused` with the
/// same ticket.
pub trait MediaEngine {
    /// Replace the current source, paused at position zero.
    fn load(&mut self, src: &str);
    fn play(&mut self, ticket: PlayTicket);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);

    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    fn is_ready(&self) -> bool;

    fn poll_events(&mut self) -> Vec<EngineEvent>;
}

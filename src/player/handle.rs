use crate::{
    player::{
        EngineError, EngineEvent, MediaEngine, PlayTicket, PlaybackMetrics, PlayerCommand,
        core::EngineCore,
    },
    url_to_path,
};
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::{sync::Arc, thread::JoinHandle, time::Duration};

/// [`MediaEngine`] backed by rodio on a dedicated thread.
pub struct RodioEngine {
    commands: Sender<PlayerCommand>,
    events: Receiver<EngineEvent>,
    metrics: Arc<PlaybackMetrics>,
    thread: Option<JoinHandle<()>>,
}

impl RodioEngine {
    pub fn spawn() -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = unbounded();
        let (evt_tx, evt_rx) = unbounded();
        let metrics = PlaybackMetrics::new();

        let thread = EngineCore::spawn(cmd_rx, evt_tx, Arc::clone(&metrics))?;

        Ok(Self {
            commands: cmd_tx,
            events: evt_rx,
            metrics,
            thread: Some(thread),
        })
    }

    fn send(&self, cmd: PlayerCommand) {
        if self.commands.send(cmd).is_err() {
            log::error!("{}", EngineError::Disconnected);
        }
    }
}

impl MediaEngine for RodioEngine {
    fn load(&mut self, src: &str) {
        // Answer for the new source from now on, not the old one
        self.metrics.reset();
        self.send(PlayerCommand::Load(url_to_path(src)));
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.send(PlayerCommand::Play(ticket));
    }

    fn pause(&mut self) {
        self.send(PlayerCommand::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.metrics.set_elapsed(position);
        self.send(PlayerCommand::Seek(position));
    }

    fn position(&self) -> Duration {
        self.metrics.get_elapsed()
    }

    fn duration(&self) -> Option<Duration> {
        self.metrics.get_duration()
    }

    fn is_ready(&self) -> bool {
        self.metrics.is_ready()
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.events.try_iter().collect()
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        let _ = self.commands.send(PlayerCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}


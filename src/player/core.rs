use crate::{
    REFRESH_RATE,
    player::{
        EngineError, EngineEvent, PlayTicket, PlaybackMetrics, PlayerCommand,
        backend_rodio::RodioBackend,
    },
};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::{
    path::PathBuf,
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

/// Owns the audio output. Runs on its own thread, draining commands and
/// reporting back over `events`.
pub(crate) struct EngineCore {
    backend: RodioBackend,
    commands: Receiver<PlayerCommand>,
    events: Sender<EngineEvent>,
    metrics: Arc<PlaybackMetrics>,

    loaded: Option<PathBuf>,
    load_error: Option<String>,
    // Where to land when an exhausted source is decoded again
    resume_at: Option<Duration>,
    playing: bool,
}

impl EngineCore {
    /// Start the engine thread. The output device is opened on that
    /// thread; failing to open it fails the spawn.
    pub fn spawn(
        commands: Receiver<PlayerCommand>,
        events: Sender<EngineEvent>,
        metrics: Arc<PlaybackMetrics>,
    ) -> Result<JoinHandle<()>, EngineError> {
        let (init_tx, init_rx) = crossbeam_channel::bounded(1);

        let handle = thread::Builder::new()
            .name("turntable-engine".into())
            .spawn(move || {
                let backend = match RodioBackend::new() {
                    Ok(backend) => {
                        let _ = init_tx.send(Ok(()));
                        backend
                    }
                    Err(e) => {
                        let _ = init_tx.send(Err(e));
                        return;
                    }
                };

                let mut core = EngineCore {
                    backend,
                    commands,
                    events,
                    metrics,

                    loaded: None,
                    load_error: None,
                    resume_at: None,
                    playing: false,
                };

                core.run();
            })
            .map_err(|e| EngineError::Output(e.to_string()))?;

        init_rx.recv().map_err(|_| EngineError::Disconnected)??;
        Ok(handle)
    }

    fn run(&mut self) {
        loop {
            if !self.process_commands() {
                log::debug!("Engine thread shutting down");
                return;
            }
            self.check_track_end();
            self.update_metrics();
            thread::sleep(REFRESH_RATE);
        }
    }

    /// Returns false once the engine should stop.
    fn process_commands(&mut self) -> bool {
        loop {
            match self.commands.try_recv() {
                Ok(PlayerCommand::Load(path)) => self.load(path),
                Ok(PlayerCommand::Play(ticket)) => self.play(ticket),
                Ok(PlayerCommand::Pause) => self.pause(),
                Ok(PlayerCommand::Seek(pos)) => self.seek(pos),
                Ok(PlayerCommand::Shutdown) | Err(TryRecvError::Disconnected) => return false,
                Err(TryRecvError::Empty) => return true,
            }
        }
    }

    fn check_track_end(&mut self) {
        // Checking `playing` ensures the event is sent once
        if self.playing && self.backend.source_ended() {
            self.playing = false;
            self.emit(EngineEvent::Ended);
        }
    }

    fn update_metrics(&mut self) {
        if self.loaded.is_some() && !self.backend.is_empty() {
            self.metrics.set_elapsed(self.backend.position());
        }
    }

    fn load(&mut self, path: PathBuf) {
        self.metrics.reset();
        self.playing = false;
        self.resume_at = None;

        match self.backend.load(&path) {
            Ok(duration) => {
                log::debug!("Loaded {}", path.display());
                self.load_error = None;
                self.metrics.set_duration(duration);
                self.metrics.set_ready(true);

                if let Some(duration) = duration {
                    self.emit(EngineEvent::DurationKnown(duration));
                }
                self.emit(EngineEvent::Ready);
            }
            Err(e) => {
                log::warn!("{e}");
                self.load_error = Some(e.to_string());
            }
        }

        self.loaded = Some(path);
    }

    fn play(&mut self, ticket: PlayTicket) {
        if let Some(reason) = &self.load_error {
            let reason = reason.clone();
            self.emit(EngineEvent::PlayRefused(ticket, reason));
            return;
        }

        if let Err(e) = self.rearm() {
            self.emit(EngineEvent::PlayRefused(ticket, e.to_string()));
            return;
        }

        self.backend.play();
        self.playing = true;
        self.emit(EngineEvent::PlayStarted(ticket));
    }

    /// Decode the loaded file again if its source already ran out.
    fn rearm(&mut self) -> Result<(), EngineError> {
        let path = self.loaded.clone().ok_or(EngineError::NothingLoaded)?;
        if !self.backend.is_empty() {
            return Ok(());
        }

        self.backend.load(&path)?;
        if let Some(pos) = self.resume_at.take().filter(|p| !p.is_zero()) {
            self.backend.seek(pos)?;
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.backend.pause();
        self.playing = false;
    }

    fn seek(&mut self, pos: Duration) {
        if self.loaded.is_none() {
            return;
        }

        if self.backend.is_empty() {
            self.resume_at = Some(pos);
            self.metrics.set_elapsed(pos);
            return;
        }

        match self.backend.seek(pos) {
            Ok(()) => self.metrics.set_elapsed(pos),
            Err(e) => log::warn!("{e}"),
        }
    }

    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(event);
    }
}

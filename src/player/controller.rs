use super::{
    ArtworkView, EngineEvent, MediaEngine, PlayGlyph, PlayTicket, PlayerError, PlayerState,
    PlayerView, SpinState, Visualizer,
};
use crate::{
    domain::Track,
    store::{AUDIO_STATE_KEY, StateStore, TRACK_LIST_KEY},
    viewport::ViewportClassifier,
};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    /// A start was requested and its outcome has not arrived yet.
    Starting,
    Playing,
    Paused,
}

impl PlaybackStatus {
    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackStatus::Starting | PlaybackStatus::Playing)
    }
}

/// Position and play state recovered from the store, applied once the
/// engine can seek.
struct PendingResume {
    position: Duration,
    was_playing: bool,
}

/// Single authority over the loaded track, transport state, repeat flag
/// and panel visibility, mirrored into the [`StateStore`] after every
/// change.
pub struct PlayerController {
    engine: Box<dyn MediaEngine>,
    store: Box<dyn StateStore>,
    classifier: Box<dyn ViewportClassifier>,
    viewport_width: u32,
    visualizer_bars: usize,

    tracks: Vec<Track>,
    current: Option<usize>,
    src: String,
    artwork_src: String,
    status: PlaybackStatus,
    position: Duration,
    repeat: bool,
    panel_hidden: bool,

    last_ticket: u64,
    awaiting: Option<PlayTicket>,
    pending_resume: Option<PendingResume>,
    restored: bool,

    view: PlayerView,
}

impl PlayerController {
    pub fn new(
        engine: Box<dyn MediaEngine>,
        store: Box<dyn StateStore>,
        classifier: Box<dyn ViewportClassifier>,
        viewport_width: u32,
        visualizer_bars: usize,
    ) -> Self {
        let mut controller = PlayerController {
            engine,
            store,
            classifier,
            viewport_width,
            visualizer_bars,

            tracks: Vec::new(),
            current: None,
            src: String::new(),
            artwork_src: String::new(),
            status: PlaybackStatus::Stopped,
            position: Duration::ZERO,
            repeat: false,
            panel_hidden: true,

            last_ticket: 0,
            awaiting: None,
            pending_resume: None,
            restored: false,

            view: PlayerView::default(),
        };

        if !controller.is_mobile() {
            controller.view.visualizer = Some(Visualizer::new(visualizer_bars));
        }

        controller
    }
}

// ==============
//    COMMANDS
// ==============
impl PlayerController {
    pub fn load_track(&mut self, index: usize) -> Result<(), PlayerError> {
        if index >= self.tracks.len() {
            return Err(PlayerError::TrackOutOfRange {
                index,
                len: self.tracks.len(),
            });
        }

        self.switch_to(index, true);
        self.persist_track_list();
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        if self.current.is_none() {
            return;
        }

        if let Some(resume) = self.pending_resume.take() {
            self.engine.seek(resume.position);
            self.position = resume.position;
        }

        match self.status.is_playing() {
            true => {
                self.engine.pause();
                self.awaiting = None;
                self.status = PlaybackStatus::Paused;
                self.pause_animation();
            }
            false => self.request_play(),
        }

        self.sync_glyph();
        self.persist();
    }

    pub fn stop(&mut self) {
        if self.current.is_none() {
            return;
        }

        self.pending_resume = None;
        self.engine.pause();
        self.engine.seek(Duration::ZERO);

        self.awaiting = None;
        self.status = PlaybackStatus::Stopped;
        self.position = Duration::ZERO;
        self.view.reset_time();

        self.stop_all_animation();
        self.sync_glyph();
        self.persist();
    }

    pub fn restart(&mut self) {
        if self.current.is_none() {
            return;
        }

        self.pending_resume = None;
        self.rewind();
        self.request_play();
        self.sync_glyph();
        self.persist();
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
        self.view.repeat_enabled = self.repeat;
        self.persist();
    }

    pub fn next(&mut self) {
        self.step(true);
    }

    pub fn previous(&mut self) {
        self.step(false);
    }

    /// Jump to `fraction` of the current track's duration.
    pub fn seek(&mut self, fraction: f64) -> Result<(), PlayerError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(PlayerError::InvalidSeek(fraction));
        }

        if self.current.is_none() {
            return Ok(());
        }

        let Some(duration) = self.engine.duration().filter(|d| !d.is_zero()) else {
            return Ok(());
        };

        self.pending_resume = None;
        let target = duration.mul_f64(fraction);
        self.engine.seek(target);
        self.position = target;
        self.view.set_time(target, Some(duration));
        self.persist();

        Ok(())
    }

    pub fn toggle_panel_visibility(&mut self) {
        self.panel_hidden = !self.panel_hidden;
        self.view.panel_hidden = self.panel_hidden;
        if !self.panel_hidden {
            self.view.panel_active = true;
        }
        self.persist();
    }

    pub fn on_track_ended(&mut self) {
        let Some(current) = self.current else {
            return;
        };

        if self.repeat {
            self.rewind();
            self.request_play();
        } else if current + 1 < self.tracks.len() {
            self.next();
            return;
        } else {
            self.awaiting = None;
            self.status = PlaybackStatus::Paused;
            if let Some(duration) = self.engine.duration() {
                self.position = duration;
                self.view.set_time(duration, Some(duration));
            }
            self.stop_all_animation();
        }

        self.sync_glyph();
        self.persist();
    }

    /// Persist immediately, with the engine's live position.
    pub fn on_page_hide(&mut self) {
        if self.current.is_some() && self.pending_resume.is_none() {
            self.position = self.engine.position();
        }
        self.persist();
    }

    /// Apply a settled viewport width. Returns whether the layout mode changed.
    pub fn on_viewport_change(&mut self, width: u32) -> bool {
        let was_mobile = self.is_mobile();
        self.viewport_width = width;
        let mobile = self.is_mobile();

        if was_mobile == mobile {
            return false;
        }

        match mobile {
            true => {
                self.view.visualizer = None;
                self.view.artwork = None;
            }
            false => {
                self.view.visualizer = Some(Visualizer::new(self.visualizer_bars));
                if self.current.is_some() && !self.artwork_src.is_empty() {
                    self.view.artwork = Some(ArtworkView::new(self.artwork_src.clone()));
                }
                if self.status == PlaybackStatus::Playing {
                    self.start_animation();
                }
            }
        }

        log::debug!("Layout switched to {}", if mobile { "mobile" } else { "desktop" });
        true
    }
}

// =================
//    RESTORATION
// =================
impl PlayerController {
    /// Build the track sequence and rehydrate the last saved state.
    ///
    /// Runs once; later calls are ignored. `page_tracks` wins over the
    /// saved sequence when it is not empty.
    pub fn restore_on_load(&mut self, page_tracks: Vec<Track>) {
        if self.restored {
            log::warn!("Player state was already restored, ignoring");
            return;
        }
        self.restored = true;

        match page_tracks.is_empty() {
            true => self.tracks = self.load_record(TRACK_LIST_KEY).unwrap_or_default(),
            false => {
                self.tracks = page_tracks;
                self.persist_track_list();
            }
        }

        let Some(state) = self.load_record::<PlayerState>(AUDIO_STATE_KEY) else {
            return;
        };

        let Some(index) = self.resolve_index(&state) else {
            log::info!("Discarding saved player state, {:?} is not in the track list", state.src);
            self.remove_record(AUDIO_STATE_KEY);
            return;
        };

        // Keep the record pointing at the track it names
        let mut state = state;
        if state.track_index() != Some(index) {
            state.current_track_index = index as i64;
            self.save_record(AUDIO_STATE_KEY, &state);
        }

        self.current = Some(index);
        self.src = state.src;
        self.view.track_name = state.track_name;
        self.repeat = state.is_repeat_enabled;
        self.view.repeat_enabled = self.repeat;
        self.panel_hidden = state.is_player_hidden;
        self.view.panel_hidden = self.panel_hidden;
        self.view.panel_active = true;

        self.artwork_src = state.artwork_src;
        if !self.artwork_src.is_empty() && !self.is_mobile() {
            self.view.artwork = Some(ArtworkView::new(self.artwork_src.clone()));
        }

        self.engine.load(&self.src);
        self.status = PlaybackStatus::Paused;

        let position = Duration::try_from_secs_f64(state.current_time).unwrap_or_default();
        self.position = position;
        self.view.set_time(position, self.engine.duration());
        self.sync_glyph();

        self.pending_resume = Some(PendingResume {
            position,
            was_playing: state.is_playing,
        });

        if self.engine.is_ready() {
            self.resume_playback();
        }
    }

    /// Prefer the saved index, fall back to finding the saved url.
    fn resolve_index(&self, state: &PlayerState) -> Option<usize> {
        if state.src.is_empty() {
            return None;
        }

        state
            .track_index()
            .filter(|&i| self.tracks.get(i).is_some_and(|t| t.url == state.src))
            .or_else(|| self.tracks.iter().position(|t| t.url == state.src))
    }

    fn resume_playback(&mut self) {
        let Some(resume) = self.pending_resume.take() else {
            return;
        };

        self.engine.seek(resume.position);
        self.position = resume.position;

        if resume.was_playing {
            self.request_play();
        }
    }
}

// ============
//    ENGINE
// ============
impl PlayerController {
    pub fn pump_engine_events(&mut self) {
        for event in self.engine.poll_events() {
            self.handle_engine_event(event);
        }
    }

    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Ready => self.resume_playback(),
            EngineEvent::DurationKnown(duration) => {
                self.view.set_time(self.position, Some(duration))
            }
            EngineEvent::PlayStarted(ticket) => self.on_play_started(ticket),
            EngineEvent::PlayRefused(ticket, reason) => self.on_play_refused(ticket, &reason),
            // Only the playing track can end; anything else is left over
            // from a source that was replaced.
            EngineEvent::Ended if self.status == PlaybackStatus::Playing => self.on_track_ended(),
            EngineEvent::Ended => (),
        }
    }

    /// Advance animations and refresh the time readout.
    pub fn tick(&mut self, dt: Duration) {
        if self.status == PlaybackStatus::Playing && self.pending_resume.is_none() {
            self.position = self.engine.position();
        }

        if self.current.is_some() {
            self.view.set_time(self.position, self.engine.duration());
        }

        self.view.advance(dt);
    }

    fn request_play(&mut self) {
        self.last_ticket += 1;
        let ticket = PlayTicket(self.last_ticket);

        self.awaiting = Some(ticket);
        self.status = PlaybackStatus::Starting;
        self.engine.play(ticket);
    }

    fn on_play_started(&mut self, ticket: PlayTicket) {
        if self.awaiting != Some(ticket) {
            log::debug!("Ignoring outcome of superseded start {ticket:?}");
            return;
        }

        self.awaiting = None;
        self.status = PlaybackStatus::Playing;
        self.sync_glyph();
        self.start_animation();
    }

    fn on_play_refused(&mut self, ticket: PlayTicket, reason: &str) {
        if self.awaiting != Some(ticket) {
            return;
        }

        log::debug!("Playback start refused: {reason}");
        self.awaiting = None;
        self.status = PlaybackStatus::Paused;
        self.sync_glyph();
        self.persist();
    }

    fn rewind(&mut self) {
        self.engine.seek(Duration::ZERO);
        self.position = Duration::ZERO;
        self.view.reset_time();
    }
}

// ============
//    TRACKS
// ============
impl PlayerController {
    fn step(&mut self, forward: bool) {
        let len = self.tracks.len();
        let Some(current) = self.current else {
            return;
        };
        if len == 0 {
            return;
        }

        let index = match forward {
            true => (current + 1) % len,
            false => (current + len - 1) % len,
        };

        self.switch_to(index, false);
    }

    /// Replace the current track. Animations of the outgoing track are
    /// stopped before anything about the incoming one is shown.
    fn switch_to(&mut self, index: usize, reveal: bool) {
        let Some(track) = self.tracks.get(index).cloned() else {
            return;
        };

        self.stop_all_animation();
        self.pending_resume = None;

        self.current = Some(index);
        self.src = track.url.clone();
        self.view.track_name = track.name;
        self.artwork_src = track.artwork.clone().unwrap_or_default();
        self.view.artwork = match (track.artwork, self.is_mobile()) {
            (Some(artwork), false) => Some(ArtworkView::new(artwork)),
            _ => None,
        };

        self.view.panel_active = true;
        if reveal {
            self.panel_hidden = false;
            self.view.panel_hidden = false;
        }

        self.engine.load(&track.url);
        self.position = Duration::ZERO;
        self.view.set_time(Duration::ZERO, self.engine.duration());

        self.request_play();
        self.sync_glyph();
        self.persist();
    }
}

// ===============
//    ANIMATION
// ===============
impl PlayerController {
    fn start_animation(&mut self) {
        if self.is_mobile() {
            self.view.set_spin(SpinState::Idle);
            return;
        }

        self.view.set_spin(SpinState::Spinning);
        if let Some(vis) = self.view.visualizer.as_mut() {
            vis.start(&mut rand::rng());
        }
    }

    fn pause_animation(&mut self) {
        let spin = match self.is_mobile() {
            true => SpinState::Idle,
            false => SpinState::Frozen,
        };
        self.view.set_spin(spin);

        if let Some(vis) = self.view.visualizer.as_mut() {
            vis.pause();
        }
    }

    fn stop_all_animation(&mut self) {
        self.view.set_spin(SpinState::Idle);
        if let Some(vis) = self.view.visualizer.as_mut() {
            vis.pause();
        }
    }

    /// A start in flight keeps whatever glyph was showing.
    fn sync_glyph(&mut self) {
        match self.status {
            PlaybackStatus::Playing => self.view.glyph = PlayGlyph::Pause,
            PlaybackStatus::Starting => (),
            PlaybackStatus::Stopped | PlaybackStatus::Paused => self.view.glyph = PlayGlyph::Play,
        }
    }
}

// =================
//    PERSISTENCE
// =================
impl PlayerController {
    pub fn snapshot(&self) -> PlayerState {
        let mut state = PlayerState {
            is_repeat_enabled: self.repeat,
            is_player_hidden: self.panel_hidden,
            ..PlayerState::default()
        };

        if let Some(index) = self.current {
            state.src = self.src.clone();
            state.track_name = self.view.track_name.clone();
            state.current_time = self.position.as_secs_f64();
            state.is_playing = self.status.is_playing();
            state.current_track_index = index as i64;
            state.artwork_src = self.artwork_src.clone();
        }

        state
    }

    /// Without a loaded track there is nothing to resume, so the record
    /// is removed rather than written.
    fn persist(&mut self) {
        match self.current {
            Some(_) => {
                let state = self.snapshot();
                self.save_record(AUDIO_STATE_KEY, &state);
            }
            None => self.remove_record(AUDIO_STATE_KEY),
        }
    }

    fn persist_track_list(&mut self) {
        if !self.tracks.is_empty() {
            let tracks = std::mem::take(&mut self.tracks);
            self.save_record(TRACK_LIST_KEY, &tracks);
            self.tracks = tracks;
        }
    }

    fn save_record<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode {key}: {e}");
                return;
            }
        };

        if let Err(e) = self.store.save(key, &json) {
            log::warn!("Could not persist {key}: {e}");
        }
    }

    fn load_record<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        match self.store.load(key) {
            Ok(Some(json)) => serde_json::from_str(&json)
                .map_err(|e| log::warn!("Ignoring malformed {key}: {e}"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read {key}: {e}");
                None
            }
        }
    }

    fn remove_record(&mut self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            log::warn!("Could not remove {key}: {e}");
        }
    }
}

// ===============
//    ACCESSORS
// ===============
impl PlayerController {
    pub fn view(&self) -> &PlayerView {
        &self.view
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    /// Length of the current track, once the engine knows it.
    pub fn duration(&self) -> Option<Duration> {
        self.current.and(self.engine.duration())
    }

    pub fn is_repeat_enabled(&self) -> bool {
        self.repeat
    }

    pub fn is_panel_hidden(&self) -> bool {
        self.panel_hidden
    }

    pub fn is_mobile(&self) -> bool {
        self.classifier.is_mobile(self.viewport_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        player::fake::{FAKE_DURATION, FakeEngine},
        store::MemoryStore,
        viewport::BreakpointClassifier,
    };

    const DESKTOP: u32 = 1024;
    const MOBILE: u32 = 600;

    fn tracks() -> Vec<Track> {
        ["A", "B", "C"]
            .into_iter()
            .map(|name| {
                Track::new(format!("/music/{name}.mp3", name = name.to_lowercase()), name)
                    .with_artwork(Some(format!("/music/{name}.jpg")))
            })
            .collect()
    }

    fn controller_at(
        engine: &FakeEngine,
        store: &MemoryStore,
        width: u32,
    ) -> PlayerController {
        PlayerController::new(
            Box::new(engine.clone()),
            Box::new(store.clone()),
            Box::new(BreakpointClassifier::default()),
            width,
            24,
        )
    }

    fn setup() -> (PlayerController, FakeEngine, MemoryStore) {
        let engine = FakeEngine::new();
        let store = MemoryStore::new();
        let mut ctl = controller_at(&engine, &store, DESKTOP);
        ctl.restore_on_load(tracks());
        (ctl, engine, store)
    }

    fn saved_state(store: &MemoryStore) -> Option<PlayerState> {
        store
            .get(AUDIO_STATE_KEY)
            .map(|json| serde_json::from_str(&json).unwrap())
    }

    fn playing(ctl: &mut PlayerController, index: usize) {
        ctl.load_track(index).unwrap();
        ctl.pump_engine_events();
        assert_eq!(ctl.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn load_track_starts_playback_and_reveals_panel() {
        let (mut ctl, engine, store) = setup();
        assert!(ctl.is_panel_hidden());

        ctl.load_track(1).unwrap();

        assert_eq!(engine.log().loaded, vec!["/music/b.mp3"]);
        assert_eq!(engine.log().plays.len(), 1);
        assert_eq!(ctl.status(), PlaybackStatus::Starting);
        assert!(!ctl.is_panel_hidden());
        assert_eq!(ctl.view().track_name, "B");

        ctl.pump_engine_events();
        assert_eq!(ctl.status(), PlaybackStatus::Playing);
        assert_eq!(ctl.view().glyph, PlayGlyph::Pause);
        assert_eq!(ctl.view().spin(), Some(SpinState::Spinning));
        assert!(ctl.view().visualizer.as_ref().unwrap().is_running());

        let state = saved_state(&store).unwrap();
        assert_eq!(state.current_track_index, 1);
        assert_eq!(state.src, "/music/b.mp3");
        assert!(state.is_consistent());
        assert!(store.get(TRACK_LIST_KEY).is_some());
    }

    #[test]
    fn load_track_rejects_out_of_range() {
        let (mut ctl, engine, _) = setup();

        assert_eq!(
            ctl.load_track(3),
            Err(PlayerError::TrackOutOfRange { index: 3, len: 3 })
        );
        assert!(engine.log().loaded.is_empty());
        assert_eq!(ctl.current_index(), None);
    }

    #[test]
    fn refused_start_is_absorbed() {
        let (mut ctl, engine, store) = setup();
        engine.log_mut().refuse_play = true;

        ctl.load_track(0).unwrap();
        ctl.pump_engine_events();

        assert_eq!(ctl.status(), PlaybackStatus::Paused);
        assert_eq!(ctl.view().glyph, PlayGlyph::Play);
        assert!(!ctl.is_panel_hidden());
        assert_eq!(ctl.view().spin(), Some(SpinState::Idle));
        assert!(!saved_state(&store).unwrap().is_playing);
    }

    #[test]
    fn next_and_previous_wrap_around() {
        let (mut ctl, _, _) = setup();
        let n = ctl.tracks().len();

        for i in 0..n {
            ctl.load_track(i).unwrap();
            ctl.next();
            assert_eq!(ctl.current_index(), Some((i + 1) % n));

            ctl.load_track(i).unwrap();
            ctl.previous();
            assert_eq!(ctl.current_index(), Some((i + n - 1) % n));
        }
    }

    #[test]
    fn next_walks_the_sequence_and_wraps() {
        let (mut ctl, engine, _) = setup();
        playing(&mut ctl, 0);

        ctl.next();
        assert_eq!(ctl.current_track().unwrap().name, "B");
        ctl.next();
        assert_eq!(ctl.current_track().unwrap().name, "C");
        ctl.next();
        assert_eq!(ctl.current_track().unwrap().name, "A");

        assert_eq!(
            engine.log().loaded,
            vec!["/music/a.mp3", "/music/b.mp3", "/music/c.mp3", "/music/a.mp3"]
        );
    }

    #[test]
    fn stepping_keeps_panel_visibility() {
        let (mut ctl, _, _) = setup();
        playing(&mut ctl, 0);
        ctl.toggle_panel_visibility();
        assert!(ctl.is_panel_hidden());

        ctl.next();
        assert!(ctl.is_panel_hidden());
    }

    #[test]
    fn switching_tracks_stops_animation_before_starting() {
        let (mut ctl, engine, _) = setup();
        playing(&mut ctl, 0);
        engine.log_mut().start_on_play = false;

        ctl.next();

        assert_eq!(ctl.view().spin(), Some(SpinState::Idle));
        assert!(!ctl.view().visualizer.as_ref().unwrap().is_running());
        assert_eq!(ctl.view().artwork.as_ref().unwrap().src, "/music/B.jpg");
    }

    #[test]
    fn commands_without_a_track_are_noops() {
        let (mut ctl, engine, store) = setup();
        let before = ctl.snapshot();

        ctl.previous();
        ctl.next();
        ctl.toggle_play_pause();
        ctl.stop();
        ctl.restart();
        ctl.seek(0.5).unwrap();

        assert_eq!(ctl.snapshot(), before);
        assert_eq!(ctl.current_index(), None);
        assert!(engine.log().loaded.is_empty());
        assert!(engine.log().plays.is_empty());
        assert!(saved_state(&store).is_none());
    }

    #[test]
    fn empty_sequence_ignores_stepping() {
        let engine = FakeEngine::new();
        let store = MemoryStore::new();
        let mut ctl = controller_at(&engine, &store, DESKTOP);
        ctl.restore_on_load(Vec::new());

        ctl.next();
        ctl.previous();

        assert_eq!(ctl.current_index(), None);
        assert!(ctl.load_track(0).is_err());
    }

    #[test]
    fn toggle_play_pause_round_trip() {
        let (mut ctl, engine, store) = setup();
        playing(&mut ctl, 0);

        ctl.toggle_play_pause();
        assert_eq!(ctl.status(), PlaybackStatus::Paused);
        assert_eq!(ctl.view().glyph, PlayGlyph::Play);
        assert_eq!(ctl.view().spin(), Some(SpinState::Frozen));
        assert!(!ctl.view().visualizer.as_ref().unwrap().is_running());
        assert_eq!(engine.log().pauses, 1);
        assert!(!saved_state(&store).unwrap().is_playing);

        let bars = ctl.view().visualizer.as_ref().unwrap().bars().to_vec();

        ctl.toggle_play_pause();
        ctl.pump_engine_events();
        assert_eq!(ctl.status(), PlaybackStatus::Playing);
        assert_eq!(ctl.view().glyph, PlayGlyph::Pause);
        assert_eq!(ctl.view().visualizer.as_ref().unwrap().bars(), bars.as_slice());
        assert!(saved_state(&store).unwrap().is_playing);
    }

    #[test]
    fn stale_start_outcome_is_ignored() {
        let (mut ctl, engine, _) = setup();
        engine.log_mut().start_on_play = false;

        ctl.load_track(0).unwrap();
        let first = engine.last_ticket().unwrap();
        ctl.toggle_play_pause();
        assert_eq!(ctl.status(), PlaybackStatus::Paused);

        ctl.handle_engine_event(EngineEvent::PlayStarted(first));

        assert_eq!(ctl.status(), PlaybackStatus::Paused);
        assert_eq!(ctl.view().glyph, PlayGlyph::Play);
        assert_eq!(ctl.view().spin(), Some(SpinState::Frozen));
    }

    #[test]
    fn stop_rewinds_and_keeps_panel() {
        let (mut ctl, engine, store) = setup();
        playing(&mut ctl, 2);
        ctl.seek(0.5).unwrap();

        ctl.stop();

        assert_eq!(ctl.status(), PlaybackStatus::Stopped);
        assert_eq!(ctl.position(), Duration::ZERO);
        assert_eq!(engine.log().seeks.last(), Some(&Duration::ZERO));
        assert_eq!(ctl.view().elapsed, "0:00");
        assert_eq!(ctl.view().spin(), Some(SpinState::Idle));
        assert!(!ctl.is_panel_hidden());

        let state = saved_state(&store).unwrap();
        assert_eq!(state.current_time, 0.0);
        assert!(!state.is_playing);
    }

    #[test]
    fn restart_rewinds_and_plays() {
        let (mut ctl, engine, _) = setup();
        playing(&mut ctl, 0);
        ctl.seek(0.25).unwrap();

        ctl.restart();
        ctl.pump_engine_events();

        assert_eq!(ctl.position(), Duration::ZERO);
        assert_eq!(engine.log().plays.len(), 2);
        assert_eq!(ctl.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn seek_updates_readout() {
        let (mut ctl, engine, store) = setup();
        playing(&mut ctl, 0);

        ctl.seek(0.0).unwrap();
        assert_eq!(ctl.view().elapsed, "0:00");

        ctl.seek(1.0).unwrap();
        assert_eq!(ctl.view().elapsed, ctl.view().total);
        assert_eq!(ctl.view().total, "3:20");
        assert_eq!(ctl.view().progress_percent, 100.0);

        ctl.seek(0.5).unwrap();
        assert_eq!(engine.log().seeks.last(), Some(&(FAKE_DURATION / 2)));
        assert_eq!(saved_state(&store).unwrap().current_time, 100.0);
    }

    #[test]
    fn seek_outside_unit_range_is_rejected() {
        let (mut ctl, _, _) = setup();
        playing(&mut ctl, 0);

        assert_eq!(ctl.seek(1.5), Err(PlayerError::InvalidSeek(1.5)));
        assert!(ctl.seek(-0.1).is_err());
        assert!(ctl.seek(f64::NAN).is_err());
    }

    #[test]
    fn seek_without_duration_is_a_noop() {
        let (mut ctl, engine, _) = setup();
        engine.log_mut().ready_on_load = false;
        ctl.load_track(0).unwrap();

        ctl.seek(0.5).unwrap();

        assert!(engine.log().seeks.is_empty());
    }

    #[test]
    fn toggle_repeat_twice_is_identity() {
        let (mut ctl, _, store) = setup();
        playing(&mut ctl, 0);
        let before = ctl.is_repeat_enabled();

        ctl.toggle_repeat();
        assert!(saved_state(&store).unwrap().is_repeat_enabled);
        ctl.toggle_repeat();

        assert_eq!(ctl.is_repeat_enabled(), before);
        assert_eq!(saved_state(&store).unwrap().is_repeat_enabled, before);
    }

    #[test]
    fn panel_toggle_works_without_a_track() {
        let (mut ctl, _, store) = setup();

        ctl.toggle_panel_visibility();
        assert!(!ctl.is_panel_hidden());
        assert_eq!(ctl.view().toggle_label(), "Hide Player");
        assert!(saved_state(&store).is_none());

        ctl.toggle_panel_visibility();
        assert!(ctl.is_panel_hidden());
    }

    #[test]
    fn ended_with_repeat_replays_same_track() {
        let (mut ctl, engine, _) = setup();
        playing(&mut ctl, 1);
        ctl.toggle_repeat();

        ctl.handle_engine_event(EngineEvent::Ended);
        ctl.pump_engine_events();

        assert_eq!(ctl.current_index(), Some(1));
        assert_eq!(engine.log().loaded.len(), 1);
        assert_eq!(engine.log().seeks.last(), Some(&Duration::ZERO));
        assert_eq!(ctl.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn ended_advances_to_next_track() {
        let (mut ctl, _, _) = setup();
        playing(&mut ctl, 0);

        ctl.handle_engine_event(EngineEvent::Ended);

        assert_eq!(ctl.current_index(), Some(1));
    }

    #[test]
    fn ended_on_last_track_stops_visuals_at_the_end() {
        let (mut ctl, _, store) = setup();
        playing(&mut ctl, 2);

        ctl.handle_engine_event(EngineEvent::Ended);

        assert_eq!(ctl.current_index(), Some(2));
        assert_eq!(ctl.status(), PlaybackStatus::Paused);
        assert_eq!(ctl.view().glyph, PlayGlyph::Play);
        assert_eq!(ctl.view().spin(), Some(SpinState::Idle));
        assert_eq!(ctl.position(), FAKE_DURATION);
        assert!(!saved_state(&store).unwrap().is_playing);
    }

    #[test]
    fn ended_from_replaced_source_is_ignored() {
        let (mut ctl, engine, _) = setup();
        playing(&mut ctl, 0);
        engine.log_mut().start_on_play = false;
        ctl.next();

        ctl.handle_engine_event(EngineEvent::Ended);

        assert_eq!(ctl.current_index(), Some(1));
    }

    #[test]
    fn restore_round_trips_persisted_fields() {
        let (mut ctl, engine, store) = setup();
        playing(&mut ctl, 1);
        ctl.toggle_repeat();
        ctl.toggle_panel_visibility();
        engine.log_mut().position = Duration::from_secs(42);
        ctl.on_page_hide();
        let before = saved_state(&store).unwrap();

        let mut reloaded = controller_at(&FakeEngine::new(), &store, DESKTOP);
        reloaded.restore_on_load(tracks());
        let after = saved_state(&store).unwrap();

        assert_eq!(after.track_name, before.track_name);
        assert_eq!(after.current_track_index, before.current_track_index);
        assert_eq!(after.is_repeat_enabled, before.is_repeat_enabled);
        assert_eq!(after.is_player_hidden, before.is_player_hidden);

        assert_eq!(reloaded.current_index(), Some(1));
        assert!(reloaded.is_repeat_enabled());
        assert!(reloaded.is_panel_hidden());
        assert_eq!(reloaded.view().track_name, "B");
        assert_eq!(reloaded.snapshot().track_name, before.track_name);
    }

    #[test]
    fn restore_resumes_once_engine_is_ready() {
        let (mut ctl, _, store) = setup();
        playing(&mut ctl, 0);
        ctl.seek(0.5).unwrap();

        let engine = FakeEngine::new();
        engine.log_mut().ready_on_load = false;
        let mut reloaded = controller_at(&engine, &store, DESKTOP);
        reloaded.restore_on_load(tracks());

        assert_eq!(engine.log().loaded, vec!["/music/a.mp3"]);
        assert!(engine.log().seeks.is_empty());
        assert!(engine.log().plays.is_empty());
        assert_eq!(reloaded.view().elapsed, "1:40");

        engine.push(EngineEvent::Ready);
        reloaded.pump_engine_events();
        assert_eq!(engine.log().seeks, vec![Duration::from_secs(100)]);
        assert_eq!(engine.log().plays.len(), 1);

        reloaded.pump_engine_events();
        assert_eq!(reloaded.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn restore_of_paused_state_does_not_autoplay() {
        let (mut ctl, _, store) = setup();
        playing(&mut ctl, 0);
        ctl.toggle_play_pause();

        let engine = FakeEngine::new();
        let mut reloaded = controller_at(&engine, &store, DESKTOP);
        reloaded.restore_on_load(tracks());

        assert_eq!(engine.log().seeks.len(), 1);
        assert!(engine.log().plays.is_empty());
        assert_eq!(reloaded.status(), PlaybackStatus::Paused);
        assert_eq!(reloaded.view().glyph, PlayGlyph::Play);
    }

    #[test]
    fn refused_resume_falls_back_to_paused() {
        let (mut ctl, _, store) = setup();
        playing(&mut ctl, 0);

        let engine = FakeEngine::new();
        engine.log_mut().refuse_play = true;
        let mut reloaded = controller_at(&engine, &store, DESKTOP);
        reloaded.restore_on_load(tracks());
        reloaded.pump_engine_events();

        assert_eq!(reloaded.status(), PlaybackStatus::Paused);
        assert_eq!(reloaded.current_index(), Some(0));
    }

    #[test]
    fn restore_uses_saved_track_list_when_page_is_empty() {
        let (mut ctl, _, store) = setup();
        playing(&mut ctl, 2);

        let mut reloaded = controller_at(&FakeEngine::new(), &store, DESKTOP);
        reloaded.restore_on_load(Vec::new());

        assert_eq!(reloaded.tracks(), tracks().as_slice());
        assert_eq!(reloaded.current_track().unwrap().name, "C");
    }

    #[test]
    fn restore_resolves_moved_track_by_url() {
        let (mut ctl, _, store) = setup();
        playing(&mut ctl, 0);

        let mut reordered = tracks();
        reordered.reverse();
        let mut reloaded = controller_at(&FakeEngine::new(), &store, DESKTOP);
        reloaded.restore_on_load(reordered);

        assert_eq!(reloaded.current_index(), Some(2));
        assert_eq!(reloaded.current_track().unwrap().url, "/music/a.mp3");

        let state = saved_state(&store).unwrap();
        assert_eq!(state.current_track_index, 2);
        assert_eq!(state.src, "/music/a.mp3");
        assert!(state.is_playing);
    }

    #[test]
    fn restore_discards_state_for_unknown_track() {
        let (mut ctl, _, store) = setup();
        playing(&mut ctl, 0);

        let engine = FakeEngine::new();
        let mut reloaded = controller_at(&engine, &store, DESKTOP);
        reloaded.restore_on_load(vec![Track::new("/elsewhere/z.mp3", "Z")]);

        assert_eq!(reloaded.current_index(), None);
        assert!(engine.log().loaded.is_empty());
        assert!(saved_state(&store).is_none());
    }

    #[test]
    fn restore_runs_once() {
        let (mut ctl, _, _) = setup();
        ctl.restore_on_load(vec![Track::new("/x.mp3", "X")]);

        assert_eq!(ctl.tracks().len(), 3);
    }

    #[test]
    fn malformed_record_is_ignored() {
        let store = MemoryStore::new();
        let mut handle = store.clone();
        handle.save(AUDIO_STATE_KEY, "{not json").unwrap();

        let mut ctl = controller_at(&FakeEngine::new(), &store, DESKTOP);
        ctl.restore_on_load(tracks());

        assert_eq!(ctl.current_index(), None);
    }

    #[test]
    fn mobile_hides_artwork_and_visualizer() {
        let engine = FakeEngine::new();
        let store = MemoryStore::new();
        let mut ctl = controller_at(&engine, &store, MOBILE);
        ctl.restore_on_load(tracks());

        playing(&mut ctl, 0);

        assert!(ctl.view().artwork.is_none());
        assert!(ctl.view().visualizer.is_none());
        assert_eq!(saved_state(&store).unwrap().artwork_src, "/music/A.jpg");
    }

    #[test]
    fn viewport_transitions_rebuild_desktop_visuals() {
        let (mut ctl, _, _) = setup();
        playing(&mut ctl, 0);

        assert!(!ctl.on_viewport_change(900));
        assert!(ctl.on_viewport_change(MOBILE));
        assert!(ctl.view().visualizer.is_none());
        assert!(ctl.view().artwork.is_none());

        assert!(ctl.on_viewport_change(DESKTOP));
        let vis = ctl.view().visualizer.as_ref().unwrap();
        assert!(vis.is_running());
        assert_eq!(vis.bar_count(), 24);
        assert_eq!(ctl.view().spin(), Some(SpinState::Spinning));
    }

    #[test]
    fn tick_tracks_engine_position() {
        let (mut ctl, engine, _) = setup();
        playing(&mut ctl, 0);

        engine.log_mut().position = Duration::from_secs(65);
        ctl.tick(Duration::from_millis(33));

        assert_eq!(ctl.view().elapsed, "1:05");
        assert!((ctl.view().progress_percent - 32.5).abs() < 1e-9);
    }

    #[test]
    fn page_hide_persists_live_position() {
        let (mut ctl, engine, store) = setup();
        playing(&mut ctl, 0);

        engine.log_mut().position = Duration::from_secs(12);
        ctl.on_page_hide();

        assert_eq!(saved_state(&store).unwrap().current_time, 12.0);
    }
}

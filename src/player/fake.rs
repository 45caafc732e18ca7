use super::{EngineEvent, MediaEngine, PlayTicket};
use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration};

pub(crate) const FAKE_DURATION: Duration = Duration::from_secs(200);

/// What the controller asked the engine to do, and what the engine will
/// report back.
pub(crate) struct EngineLog {
    pub loaded: Vec<String>,
    pub plays: Vec<PlayTicket>,
    pub pauses: usize,
    pub seeks: Vec<Duration>,

    pub position: Duration,
    pub duration: Option<Duration>,
    pub ready: bool,

    pub ready_on_load: bool,
    pub start_on_play: bool,
    pub refuse_play: bool,
    pub events: VecDeque<EngineEvent>,
}

impl Default for EngineLog {
    fn default() -> Self {
        EngineLog {
            loaded: Vec::new(),
            plays: Vec::new(),
            pauses: 0,
            seeks: Vec::new(),
            position: Duration::ZERO,
            duration: None,
            ready: false,
            ready_on_load: true,
            start_on_play: true,
            refuse_play: false,
            events: VecDeque::new(),
        }
    }
}

/// Scriptable engine. Clones share one log.
#[derive(Clone, Default)]
pub(crate) struct FakeEngine {
    log: Rc<RefCell<EngineLog>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> std::cell::Ref<'_, EngineLog> {
        self.log.borrow()
    }

    pub fn log_mut(&self) -> std::cell::RefMut<'_, EngineLog> {
        self.log.borrow_mut()
    }

    pub fn push(&self, event: EngineEvent) {
        self.log.borrow_mut().events.push_back(event);
    }

    pub fn last_ticket(&self) -> Option<PlayTicket> {
        self.log.borrow().plays.last().copied()
    }
}

impl MediaEngine for FakeEngine {
    fn load(&mut self, src: &str) {
        let mut log = self.log.borrow_mut();
        log.loaded.push(src.to_string());
        log.position = Duration::ZERO;
        log.ready = log.ready_on_load;
        log.duration = match log.ready_on_load {
            true => Some(FAKE_DURATION),
            false => None,
        };
    }

    fn play(&mut self, ticket: PlayTicket) {
        let mut log = self.log.borrow_mut();
        log.plays.push(ticket);

        if log.refuse_play {
            log.events
                .push_back(EngineEvent::PlayRefused(ticket, "autoplay blocked".into()));
        } else if log.start_on_play {
            log.events.push_back(EngineEvent::PlayStarted(ticket));
        }
    }

    fn pause(&mut self) {
        self.log.borrow_mut().pauses += 1;
    }

    fn seek(&mut self, position: Duration) {
        let mut log = self.log.borrow_mut();
        log.seeks.push(position);
        log.position = position;
    }

    fn position(&self) -> Duration {
        self.log.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        self.log.borrow().duration
    }

    fn is_ready(&self) -> bool {
        self.log.borrow().ready
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.log.borrow_mut().events.drain(..).collect()
    }
}

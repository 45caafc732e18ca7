use rand::Rng;
use std::{f32::consts::TAU, time::Duration};

pub const MIN_BAR_HEIGHT: f32 = 5.0;
/// Tallest bar, as a share of the visualizer's height (85%).
pub const MAX_BAR_HEIGHT: f32 = 85.0;

const MIN_CYCLE_SECS: f32 = 0.4;
const CYCLE_SPREAD_SECS: f32 = 0.8;
const MAX_DELAY_SECS: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub height: f32,
    pub duration: f32,
    pub delay: f32,
}

impl Bar {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Bar {
            height: MIN_BAR_HEIGHT + rng.random::<f32>() * (MAX_BAR_HEIGHT - MIN_BAR_HEIGHT),
            duration: MIN_CYCLE_SECS + rng.random::<f32>() * CYCLE_SPREAD_SECS,
            delay: rng.random::<f32>() * MAX_DELAY_SECS,
        }
    }

    /// Height at `clock` seconds into the animation. Each bar eases from
    /// the floor up to its own height and back once per cycle.
    fn level_at(&self, clock: f32) -> f32 {
        if clock < self.delay {
            return MIN_BAR_HEIGHT;
        }

        let phase = ((clock - self.delay) / self.duration).fract();
        let eased = 0.5 - 0.5 * (TAU * phase).cos();

        MIN_BAR_HEIGHT + (self.height - MIN_BAR_HEIGHT) * eased
    }
}

/// Bar-style level display.
///
/// Bars are randomized the first time the animation starts and never
/// again; later starts only resume the same bars. The clock only moves
/// while running, so a paused visualizer stays frozen mid-motion.
pub struct Visualizer {
    bar_count: usize,
    bars: Vec<Bar>,
    running: bool,
    clock: f32,
}

impl Visualizer {
    pub fn new(bar_count: usize) -> Self {
        Visualizer {
            bar_count,
            bars: Vec::with_capacity(bar_count),
            running: false,
            clock: 0.0,
        }
    }

    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.is_animated() {
            self.bars = (0..self.bar_count).map(|_| Bar::random(rng)).collect();
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.running {
            self.clock += dt.as_secs_f32();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_animated(&self) -> bool {
        !self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Current bar heights. Before the first start every bar sits at the floor.
    pub fn levels(&self) -> Vec<f32> {
        match self.is_animated() {
            true => self.bars.iter().map(|b| b.level_at(self.clock)).collect(),
            false => vec![MIN_BAR_HEIGHT; self.bar_count],
        }
    }
}

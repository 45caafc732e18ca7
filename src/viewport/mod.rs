mod debounce;

pub use debounce::ResizeDebouncer;

use ratatui::crossterm::terminal;

/// Widths at or below this many pixels use the compact layout.
pub const MOBILE_BREAKPOINT: u32 = 768;

pub trait ViewportClassifier {
    fn is_mobile(&self, width: u32) -> bool;
}

pub struct BreakpointClassifier {
    breakpoint: u32,
}

impl BreakpointClassifier {
    pub fn new(breakpoint: u32) -> Self {
        BreakpointClassifier { breakpoint }
    }
}

impl Default for BreakpointClassifier {
    fn default() -> Self {
        Self::new(MOBILE_BREAKPOINT)
    }
}

impl ViewportClassifier for BreakpointClassifier {
    fn is_mobile(&self, width: u32) -> bool {
        width <= self.breakpoint
    }
}

/// Width of a terminal in pixels.
///
/// Uses the size reported by the terminal when it reports one,
/// otherwise `columns × cell_width_px`.
pub fn viewport_width(columns: u16, cell_width_px: u16) -> u32 {
    match terminal::window_size() {
        Ok(size) if size.width > 0 && size.columns == columns => u32::from(size.width),
        _ => u32::from(columns) * u32::from(cell_width_px),
    }
}

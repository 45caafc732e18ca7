use super::GRADIENT;
use crate::player::Visualizer;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

const PARTIALS: [&str; 8] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇"];
const FULL: &str = "█";

/// One terminal column per bar, sampled evenly when there are more bars
/// than columns.
pub struct Bars<'a> {
    visualizer: &'a Visualizer,
}

impl<'a> Bars<'a> {
    pub fn new(visualizer: &'a Visualizer) -> Self {
        Bars { visualizer }
    }
}

/// Bar heights in eighths of a cell, one per column.
fn column_heights(levels: &[f32], columns: usize, rows: u16) -> Vec<usize> {
    if levels.is_empty() || columns == 0 {
        return Vec::new();
    }

    let shown = columns.min(levels.len());
    let eighths = usize::from(rows) * 8;

    (0..shown)
        .map(|col| {
            let level = levels[col * levels.len() / shown];
            ((level / 100.0).clamp(0.0, 1.0) * eighths as f32).round() as usize
        })
        .collect()
}

impl Widget for Bars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let heights = column_heights(
            &self.visualizer.levels(),
            usize::from(area.width),
            area.height,
        );
        let shown = heights.len();
        let left = area.x + (area.width - shown as u16) / 2;

        for (col, height) in heights.into_iter().enumerate() {
            let color = GRADIENT[(col * GRADIENT.len() / shown).min(GRADIENT.len() - 1)];
            let x = left + col as u16;

            // Fill from the bottom row up
            for row in 0..area.height {
                let filled = height.saturating_sub(usize::from(row) * 8);
                let symbol = match filled {
                    0 => continue,
                    f if f >= 8 => FULL,
                    f => PARTIALS[f],
                };

                let y = area.bottom() - 1 - row;
                buf[(x, y)].set_symbol(symbol).set_style(Style::new().fg(color));
            }
        }
    }
}

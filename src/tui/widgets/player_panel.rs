use super::{ACCENT, Artwork, Bars, PAUSE_ICON, PLAY_ICON, Progress, REPEAT_ICON, TEXT_FADED};
use crate::{player::PlayGlyph, ui_state::UiState};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, StatefulWidget, Widget},
};

pub struct PlayerPanel;

impl StatefulWidget for PlayerPanel {
    type State = UiState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let view = state.player.view();
        if area.is_empty() || !view.panel_active {
            return;
        }

        if view.panel_hidden {
            Line::from(format!("▴ {} ", view.toggle_label()))
                .fg(TEXT_FADED)
                .right_aligned()
                .render(area, buf);
            return;
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(TEXT_FADED))
            .title_bottom(Line::from(format!(" ▾ {} ", view.toggle_label())).right_aligned())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);

        let [header, progress, visuals] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let glyph = match view.glyph {
            PlayGlyph::Play => PLAY_ICON,
            PlayGlyph::Pause => PAUSE_ICON,
        };
        let repeat = match view.repeat_enabled {
            true => Span::from(format!("  {REPEAT_ICON}")).fg(ACCENT),
            false => Span::from(format!("  {REPEAT_ICON}")).fg(TEXT_FADED),
        };

        let [title, artwork] =
            Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).areas(header);

        Line::from_iter([
            Span::from(format!("{glyph}  ")).fg(ACCENT),
            Span::from(view.track_name.as_str()).bold(),
            repeat,
        ])
        .render(title, buf);

        if let Some(art) = &view.artwork {
            Artwork::new(art).render(artwork, buf);
        }

        Progress::new(view).render(progress, buf);

        if let Some(vis) = &view.visualizer {
            Bars::new(vis).render(visuals, buf);
        }
    }
}

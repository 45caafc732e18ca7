use super::{ACCENT, PAUSE_ICON, PLAY_ICON, TEXT_FADED};
use crate::{domain::FileType, player::PlayGlyph, ui_state::UiState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, Padding, StatefulWidget, Widget},
};

pub struct TrackList;

impl StatefulWidget for TrackList {
    type State = UiState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" turntable ")
            .title_style(Style::new().fg(ACCENT).bold())
            .padding(Padding::horizontal(1));

        let tracks = state.player.tracks();
        if tracks.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Line::from("No tracks. Set `library_root` in config.toml")
                .fg(TEXT_FADED)
                .centered()
                .render(inner, buf);
            return;
        }

        let current = state.player.current_index();
        let glyph = match state.player.view().glyph {
            PlayGlyph::Play => PLAY_ICON,
            PlayGlyph::Pause => PAUSE_ICON,
        };

        let items = tracks.iter().enumerate().map(|(idx, track)| {
            let marker = match Some(idx) == current {
                true => Span::from(format!("{glyph} ")).fg(ACCENT),
                false => Span::from("  "),
            };
            let name = match Some(idx) == current {
                true => Span::from(track.get_name()).fg(ACCENT).bold(),
                false => Span::from(track.get_name()),
            };
            let kind = Span::from(format!(" {}", FileType::from_path(&track.url))).fg(TEXT_FADED);

            ListItem::new(Line::from_iter([marker, name, kind]))
        });

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::new().add_modifier(Modifier::REVERSED));

        StatefulWidget::render(list, area, buf, &mut state.table_pos);
    }
}

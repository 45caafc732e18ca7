mod artwork;
mod player_panel;
mod progress;
mod status_line;
mod track_list;
mod visualizer;

pub use artwork::Artwork;
pub use player_panel::PlayerPanel;
pub use progress::Progress;
pub use status_line::StatusLine;
pub use track_list::TrackList;
pub use visualizer::Bars;

use ratatui::style::Color;

const DUR_WIDTH: u16 = 5;
const PLAY_ICON: &str = "▶";
const PAUSE_ICON: &str = "⏸";
const REPEAT_ICON: &str = "⟲";

const ACCENT: Color = Color::Rgb(198, 160, 246);
const TEXT_FADED: Color = Color::DarkGray;

static GRADIENT: [Color; 8] = [
    Color::Rgb(237, 135, 150),
    Color::Rgb(245, 169, 127),
    Color::Rgb(238, 212, 159),
    Color::Rgb(166, 218, 149),
    Color::Rgb(139, 213, 202),
    Color::Rgb(138, 173, 244),
    Color::Rgb(183, 189, 248),
    Color::Rgb(198, 160, 246),
];

use serde::{Deserialize, Serialize};

/// `currentTrackIndex` value meaning no track is loaded.
pub const NO_TRACK: i64 = -1;

/// Snapshot needed to resume playback after a restart.
///
/// `src` is empty exactly when `current_track_index` is [`NO_TRACK`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub track_name: String,
    #[serde(default)]
    pub current_time: f64,
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub is_repeat_enabled: bool,
    #[serde(default = "hidden_by_default")]
    pub is_player_hidden: bool,
    #[serde(default = "no_track")]
    pub current_track_index: i64,
    #[serde(default)]
    pub artwork_src: String,
}

fn hidden_by_default() -> bool {
    true
}

fn no_track() -> i64 {
    NO_TRACK
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState {
            src: String::new(),
            track_name: String::new(),
            current_time: 0.0,
            is_playing: false,
            is_repeat_enabled: false,
            is_player_hidden: true,
            current_track_index: NO_TRACK,
            artwork_src: String::new(),
        }
    }
}

impl PlayerState {
    pub fn track_index(&self) -> Option<usize> {
        usize::try_from(self.current_track_index).ok()
    }

    pub fn is_consistent(&self) -> bool {
        self.src.is_empty() == (self.current_track_index == NO_TRACK)
    }
}

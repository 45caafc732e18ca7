mod ui_state;

pub use ui_state::{Mode, UiState};

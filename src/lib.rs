use anyhow::{Result, anyhow};
use ratatui::crossterm::{
    ExecutableCommand,
    cursor::MoveToColumn,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

pub mod app_core;
pub mod config;
pub mod domain;
pub mod key_handler;
pub mod library;
pub mod logging;
pub mod player;
pub mod store;
pub mod tui;
pub mod ui_state;
pub mod viewport;

pub use config::Config;
pub use library::Library;
pub use player::PlayerController;

// ~30fps
pub const REFRESH_RATE: Duration = Duration::from_millis(33);

pub const CONFIG_DIRECTORY: &str = "turntable";

/// Format a position in seconds as `M:SS`.
///
/// Minutes are unbounded, seconds are floored and zero padded.
/// Negative and non-finite inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return String::from("0:00");
    }

    let total = seconds.floor() as u64;
    let mins = total / 60;
    let secs = total % 60;

    format!("{mins}:{secs:02}")
}

pub fn strip_win_prefix(path: &str) -> String {
    path.strip_prefix(r"\\?\").unwrap_or(path).to_string()
}

/// Track urls may be plain paths or `file://` urls.
pub fn url_to_path(url: &str) -> PathBuf {
    PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
}

pub fn overwrite_line(message: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    stdout
        .execute(MoveToColumn(0))?
        .execute(Clear(ClearType::CurrentLine))?
        .execute(Print(message))?;
    stdout.flush()?;
    Ok(())
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    if path_str == "~" {
        return Err(anyhow!(
            "Using the home directory as a library root would scan every file you own. Please provide a more specific path!"
        ));
    }

    if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;
        return Ok(home.join(&path_str[2..]));
    }

    Err(anyhow!("Error reading directory with tilde (~)"))
}

use crate::{CONFIG_DIRECTORY, expand_tilde, viewport::MOBILE_BREAKPOINT};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library_root: Option<PathBuf>,
    pub mobile_breakpoint: u32,
    pub cell_width_px: u16,
    pub resize_debounce_ms: u64,
    pub visualizer_bars: usize,
    pub log_level: String,
    pub session: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            library_root: None,
            mobile_breakpoint: MOBILE_BREAKPOINT,
            cell_width_px: 10,
            resize_debounce_ms: 250,
            visualizer_bars: 150,
            log_level: String::from("info"),
            session: None,
        }
    }
}

impl Config {
    /// Load `config.toml` from the user config directory.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match config_dir() {
            Some(dir) => Self::load_from_file(dir.join(CONFIG_FILENAME)),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config TOML at {}", path.display()))
    }

    pub fn library_root(&self) -> Result<Option<PathBuf>> {
        self.library_root.as_ref().map(expand_tilde).transpose()
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIRECTORY))
}

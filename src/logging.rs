use crate::config::config_dir;
use anyhow::Result;
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};

const LOG_FILENAME: &str = "turntable.log";

/// Route `log` output to a file in the config directory.
///
/// The terminal belongs to the TUI, so nothing is written to stderr.
/// `RUST_LOG` overrides `default_level`.
pub fn init(default_level: &str) -> Result<()> {
    let Some(dir) = config_dir() else {
        return Ok(());
    };
    fs::create_dir_all(&dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILENAME))?;

    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    Ok(())
}

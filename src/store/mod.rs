mod memory;
mod queries;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::Result;
use xxhash_rust::xxh3::xxh3_64;

pub const TRACK_LIST_KEY: &str = "trackList";
pub const AUDIO_STATE_KEY: &str = "audioState";

const SESSION_VARS: [&str; 3] = ["TURNTABLE_SESSION", "XDG_SESSION_ID", "TERM_SESSION_ID"];

/// Persistence for the player's small state records.
pub trait StateStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
    fn load(&mut self, key: &str) -> Result<Option<String>>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Identify the current session.
///
/// An explicit id wins, then the first session variable set in the
/// environment, then `"default"`. The raw id is hashed so it can be
/// stored as a fixed-width key.
pub fn session_id(explicit: Option<&str>) -> String {
    let raw = explicit
        .map(str::to_string)
        .or_else(|| {
            SESSION_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        })
        .unwrap_or_else(|| String::from("default"));

    format!("{:016x}", xxh3_64(raw.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_session_is_stable_and_fixed_width() {
        let a = session_id(Some("desk"));
        let b = session_id(Some("desk"));
        let c = session_id(Some("laptop"));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
    }
}

use super::{StateStore, queries::*};
use crate::CONFIG_DIRECTORY;
use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use std::{fs, path::Path, time::Duration};

const DATABASE_FILENAME: &str = "turntable.db";

/// Sessions untouched for this long are treated as ended.
const SESSION_IDLE_LIMIT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Session-scoped key/value records in SQLite.
///
/// Records are only ever read back under the session that wrote them.
/// Opening the store clears sessions that have been idle for longer than
/// [`SESSION_IDLE_LIMIT`]; another instance running in a different
/// session keeps its rows.
pub struct SqliteStore {
    conn: Connection,
    session: String,
}

impl SqliteStore {
    pub fn open_default(session: &str) -> Result<Self> {
        let db_path = dirs::config_dir()
            .context("Config folder not present on system!")?
            .join(CONFIG_DIRECTORY);

        fs::create_dir_all(&db_path).context("Failed to create or access config directory")?;

        Self::open(db_path.join(DATABASE_FILENAME), session)
    }

    pub fn open<P: AsRef<Path>>(path: P, session: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::init(conn, session)
    }

    pub fn open_in_memory(session: &str) -> Result<Self> {
        Self::init(Connection::open_in_memory()?, session)
    }

    fn init(mut conn: Connection, session: &str) -> Result<Self> {
        let tx = conn.transaction()?;
        tx.execute_batch(CREATE_TABLES)?;
        let idle = SESSION_IDLE_LIMIT.as_secs() as i64;
        let purged = tx.execute(PURGE_IDLE_SESSIONS, params![session, idle])?;
        tx.commit()?;

        if purged > 0 {
            log::info!("Cleared {purged} records left by idle sessions");
        }

        Ok(SqliteStore {
            conn,
            session: session.to_string(),
        })
    }
}

impl StateStore for SqliteStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(SET_SESSION_STATE, params![self.session, key, value])?;
        Ok(())
    }

    fn load(&mut self, key: &str) -> Result<Option<String>> {
        match self
            .conn
            .query_row(GET_SESSION_STATE, params![self.session, key], |row| {
                row.get::<_, String>(0)
            }) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute(DELETE_SESSION_STATE, params![self.session, key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn records_survive_reopen_within_a_session() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DATABASE_FILENAME);

        {
            let mut store = SqliteStore::open(&path, "s1")?;
            store.save("audioState", "{\"src\":\"a\"}")?;
        }

        let mut store = SqliteStore::open(&path, "s1")?;
        assert_eq!(store.load("audioState")?.as_deref(), Some("{\"src\":\"a\"}"));

        Ok(())
    }

    #[test]
    fn sessions_do_not_see_each_other() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DATABASE_FILENAME);

        let mut first = SqliteStore::open(&path, "first")?;
        first.save("trackList", "[\"a\"]")?;

        let mut second = SqliteStore::open(&path, "second")?;
        assert_eq!(second.load("trackList")?, None);
        second.save("trackList", "[\"b\"]")?;

        // A concurrently running session keeps its records
        assert_eq!(first.load("trackList")?.as_deref(), Some("[\"a\"]"));
        Ok(())
    }

    #[test]
    fn idle_sessions_are_purged_on_open() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DATABASE_FILENAME);

        {
            let mut store = SqliteStore::open(&path, "old")?;
            store.save("trackList", "[]")?;
            store.save("audioState", "{}")?;
            store.conn.execute("UPDATE session_state SET updated = 0", [])?;
        }

        drop(SqliteStore::open(&path, "new")?);

        let mut reopened_old = SqliteStore::open(&path, "old")?;
        assert_eq!(reopened_old.load("trackList")?, None);
        assert_eq!(reopened_old.load("audioState")?, None);

        Ok(())
    }

    #[test]
    fn save_overwrites_and_remove_deletes() -> Result<()> {
        let mut store = SqliteStore::open_in_memory("s")?;

        store.save("k", "1")?;
        store.save("k", "2")?;
        assert_eq!(store.load("k")?.as_deref(), Some("2"));

        store.remove("k")?;
        assert_eq!(store.load("k")?, None);

        store.remove("never-written")?;
        Ok(())
    }
}

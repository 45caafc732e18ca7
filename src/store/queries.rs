pub const CREATE_TABLES: &str = r"
    CREATE TABLE IF NOT EXISTS session_state(
        session TEXT NOT NULL,
        key TEXT NOT NULL,
        value TEXT NOT NULL,
        updated INTEGER NOT NULL,
        PRIMARY KEY (session, key)
    );
";

pub const GET_SESSION_STATE: &str = "
    SELECT value FROM session_state WHERE session = ?1 AND key = ?2
";

pub const SET_SESSION_STATE: &str = "
    INSERT OR REPLACE INTO session_state (session, key, value, updated)
    VALUES (?1, ?2, ?3, CAST(strftime('%s', 'now') AS INTEGER))
";

pub const DELETE_SESSION_STATE: &str = "
    DELETE FROM session_state WHERE session = ?1 AND key = ?2
";

pub const PURGE_IDLE_SESSIONS: &str = "
    DELETE FROM session_state
    WHERE session != ?1 AND session IN (
        SELECT session FROM session_state
        GROUP BY session
        HAVING MAX(updated) < CAST(strftime('%s', 'now') AS INTEGER) - ?2
    )
";

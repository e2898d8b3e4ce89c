use crate::errors::StoreError;
use crate::storage::{SqliteLeaderboard, LEADERBOARD_SCHEMA};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub(crate) fn open_impl(path: &Path) -> Result<SqliteLeaderboard, StoreError> {
    let conn = Connection::open(path)?;
    init_connection_impl(&conn)?;
    Ok(SqliteLeaderboard {
        conn: Arc::new(Mutex::new(conn)),
    })
}

pub(crate) fn memory_impl() -> Result<SqliteLeaderboard, StoreError> {
    let conn = Connection::open_in_memory()?;
    init_connection_impl(&conn)?;
    Ok(SqliteLeaderboard {
        conn: Arc::new(Mutex::new(conn)),
    })
}

pub(crate) fn from_connection_impl(conn: Connection) -> Result<SqliteLeaderboard, StoreError> {
    init_connection_impl(&conn)?;
    Ok(SqliteLeaderboard {
        conn: Arc::new(Mutex::new(conn)),
    })
}

pub(crate) fn init_connection_impl(conn: &Connection) -> Result<(), StoreError> {
    // WAL mode for file-backed DBs (no-op for in-memory)
    let _ = conn.execute_batch("PRAGMA journal_mode = WAL");
    conn.busy_timeout(std::time::Duration::from_millis(5000))?;
    conn.execute_batch(LEADERBOARD_SCHEMA)?;
    Ok(())
}

//! `SQLite` layout for the blob store.
//!
//! One row per key, mirroring a browser's local storage: the value is an
//! opaque string the store never inspects. The layout version lives in
//! `PRAGMA user_version`.

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

/// Layout version written by this build.
pub const LAYOUT_VERSION: i32 = 1;

/// SQL statement to create the key-value table.
pub const CREATE_LOCAL_STORAGE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS local_storage (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// Create the `local_storage` table on a fresh database and stamp its version.
///
/// # Errors
///
/// Returns [`Error::UnsupportedLayout`] for a database written by a newer
/// build, or a query error if the table cannot be created.
pub fn prepare(conn: &Connection) -> Result<()> {
    let found = layout_version(conn)?;
    if found > LAYOUT_VERSION {
        return Err(Error::UnsupportedLayout {
            found,
            supported: LAYOUT_VERSION,
        });
    }

    conn.execute(CREATE_LOCAL_STORAGE_TABLE, [])?;
    if found < LAYOUT_VERSION {
        debug!("Stamping blob store layout v{} (was v{})", LAYOUT_VERSION, found);
        conn.execute_batch(&format!("PRAGMA user_version = {LAYOUT_VERSION}"))?;
    }
    Ok(())
}

/// Version recorded in the database; 0 for a fresh file.
///
/// # Errors
///
/// Returns an error if the pragma cannot be read.
pub fn layout_version(conn: &Connection) -> Result<i32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

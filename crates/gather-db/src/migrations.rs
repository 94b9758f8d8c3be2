use rusqlite::Connection;
use tracing::info;

use crate::{DbError, Result};

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")
        .map_err(DbError::query("create schema_version"))?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
        .map_err(DbError::query("read schema version"))?;

    if version < 1 {
        info!("running migration v1 (users, events, attendees)");
        // No foreign keys and no uniqueness on email or (user_id, event_id).
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                email       TEXT NOT NULL DEFAULT '',
                password    TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE events (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id    INTEGER NOT NULL,
                name        TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                date        TEXT NOT NULL DEFAULT '',
                location    TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE attendees (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     INTEGER NOT NULL,
                event_id    INTEGER NOT NULL
            );

            CREATE INDEX idx_attendees_event ON attendees(event_id);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )
        .map_err(DbError::query("apply migration v1"))?;
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }
}

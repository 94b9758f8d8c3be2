pub mod error;
pub mod migrations;
pub mod models;

mod attendees;
mod events;
mod users;

pub use error::{DbError, Result};
pub use models::UserCredentials;

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;

/// Upper bound for a single repository call unless configured otherwise.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(3);

/// VM instructions between deadline checks while a statement runs.
const PROGRESS_STEPS: i32 = 1_000;

/// SQLite does not run the progress handler while it sleeps on a file lock,
/// so busy waits get a fraction of the operation budget.
const BUSY_TIMEOUT_DIVISOR: u32 = 4;

pub struct Database {
    conn: Mutex<Connection>,
    timeout: Duration,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_OPERATION_TIMEOUT)
    }

    pub fn open_with_timeout(path: &Path, timeout: Duration) -> Result<Self> {
        let conn = Connection::open(path).map_err(DbError::query("open database"))?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(DbError::query("enable WAL"))?;

        let db = Self::init(conn, timeout)?;
        info!("Database opened at {} (operation timeout {:?})", path.display(), timeout);
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open_in_memory_with_timeout(DEFAULT_OPERATION_TIMEOUT)
    }

    pub fn open_in_memory_with_timeout(timeout: Duration) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DbError::query("open database"))?;
        Self::init(conn, timeout)
    }

    fn init(conn: Connection, timeout: Duration) -> Result<Self> {
        conn.busy_timeout(timeout / BUSY_TIMEOUT_DIVISOR)
            .map_err(DbError::query("set busy timeout"))?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            timeout,
        })
    }

    /// Runs `f` as one bounded unit of work.
    ///
    /// The deadline starts before the connection lock is taken. Once the lock
    /// is held, an already-expired deadline fails fast; otherwise a progress
    /// handler interrupts the running statement when the deadline passes.
    /// Either way the caller sees `DbError::Timeout`.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let deadline = Instant::now() + self.timeout;
        let conn = self
            .conn
            .lock()
            .map_err(|e| DbError::Unavailable(format!("DB lock poisoned: {}", e)))?;

        if Instant::now() >= deadline {
            return Err(DbError::Timeout(self.timeout));
        }

        let _deadline = DeadlineGuard::install(&conn, deadline);
        f(&conn).map_err(|e| {
            if e.is_interrupted() {
                DbError::Timeout(self.timeout)
            } else {
                e
            }
        })
    }
}

/// Keeps a deadline-checking progress handler installed on the connection
/// for as long as it lives.
struct DeadlineGuard<'a> {
    conn: &'a Connection,
}

impl<'a> DeadlineGuard<'a> {
    fn install(conn: &'a Connection, deadline: Instant) -> Self {
        conn.progress_handler(PROGRESS_STEPS, Some(move || Instant::now() >= deadline));
        Self { conn }
    }
}

impl Drop for DeadlineGuard<'_> {
    fn drop(&mut self) {
        self.conn.progress_handler(0, None::<fn() -> bool>);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_deadline_fails_fast() {
        let db = Database::open_in_memory_with_timeout(Duration::ZERO).unwrap();
        let err = db.get_events().unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got {err:?}");
    }

    #[test]
    fn test_long_statement_is_interrupted() {
        let db = Database::open_in_memory_with_timeout(Duration::from_millis(50)).unwrap();
        let started = Instant::now();

        let err = db
            .with_conn(|conn| {
                conn.query_row(
                    "WITH RECURSIVE n(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM n)
                     SELECT COUNT(*) FROM n",
                    [],
                    |row| row.get::<_, i64>(0),
                )
                .map_err(DbError::query("count forever"))
            })
            .unwrap_err();

        assert!(err.is_timeout(), "expected timeout, got {err:?}");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_handler_released_after_unit_of_work() {
        let db = Database::open_in_memory_with_timeout(Duration::from_millis(50)).unwrap();
        db.get_events().unwrap();

        // A statement run outside with_conn must not be interrupted by a stale deadline.
        std::thread::sleep(Duration::from_millis(80));
        let conn = db.conn.lock().unwrap();
        let count: i64 = conn
            .query_row(
                "WITH RECURSIVE n(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM n WHERE x < 100000)
                 SELECT COUNT(*) FROM n",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 100_000);
    }

    #[test]
    fn test_file_lock_wait_stays_within_operation_timeout() {
        let path = std::env::temp_dir().join(format!("gather-busy-{}.db", std::process::id()));
        let timeout = Duration::from_millis(800);
        let db = Database::open_with_timeout(&path, timeout).unwrap();

        let writer = Connection::open(&path).unwrap();
        writer.execute_batch("BEGIN EXCLUSIVE").unwrap();

        let started = Instant::now();
        let err = db
            .with_conn(|conn| {
                conn.execute("INSERT INTO events (owner_id, name) VALUES (1, 'x')", [])
                    .map_err(DbError::query("insert event"))
            })
            .unwrap_err();
        let elapsed = started.elapsed();

        writer.execute_batch("ROLLBACK").unwrap();
        drop(writer);
        drop(db);
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }

        assert!(err.is_timeout(), "expected timeout, got {err:?}");
        assert!(elapsed < timeout, "busy wait took {elapsed:?}");
    }

    #[test]
    fn test_store_errors_keep_operation_context() {
        let db = Database::open_in_memory().unwrap();
        let err = db
            .with_conn(|conn| {
                conn.execute("INSERT INTO no_such_table VALUES (1)", [])
                    .map_err(DbError::query("insert into missing table"))
            })
            .unwrap_err();

        assert!(!err.is_timeout());
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("failed to insert into missing table"));
    }
}

use gather_types::models::Attendee;
use rusqlite::{Connection, Row, params};

use crate::error::{SingleRowExt, ensure_affected};
use crate::{Database, DbError, Result};

const ENTITY: &str = "attendee";

impl Database {
    // -- Attendees --

    /// Stores a join row. Unlike users and events, the new id is not read back,
    /// and neither uniqueness nor the referenced rows are checked.
    pub fn insert_attendee(&self, user_id: i64, event_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO attendees (user_id, event_id) VALUES (?1, ?2)",
                params![user_id, event_id],
            )
            .map_err(DbError::query("insert attendee"))?;
            Ok(())
        })
    }

    pub fn get_attendees(&self) -> Result<Vec<Attendee>> {
        self.with_conn(|conn| {
            query_attendees(conn, "SELECT id, user_id, event_id FROM attendees", [], "query attendees")
        })
    }

    pub fn get_attendee(&self, id: i64) -> Result<Attendee> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, user_id, event_id FROM attendees WHERE id = ?1",
                [id],
                attendee_from_row,
            )
            .single(ENTITY, "get attendee")
        })
    }

    pub fn get_attendees_by_event(&self, event_id: i64) -> Result<Vec<Attendee>> {
        self.with_conn(|conn| {
            query_attendees(
                conn,
                "SELECT id, user_id, event_id FROM attendees WHERE event_id = ?1",
                [event_id],
                "query attendees by event",
            )
        })
    }

    pub fn update_attendee(&self, id: i64, user_id: i64, event_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn
                .execute(
                    "UPDATE attendees SET user_id = ?1, event_id = ?2 WHERE id = ?3",
                    params![user_id, event_id, id],
                )
                .map_err(DbError::query("update attendee"))?;
            ensure_affected(affected, ENTITY)
        })
    }

    pub fn delete_attendee(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn
                .execute("DELETE FROM attendees WHERE id = ?1", [id])
                .map_err(DbError::query("delete attendee"))?;
            ensure_affected(affected, ENTITY)
        })
    }
}

fn query_attendees<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    op: &'static str,
) -> Result<Vec<Attendee>> {
    let mut stmt = conn.prepare(sql).map_err(DbError::query(op))?;

    let rows = stmt
        .query_map(params, attendee_from_row)
        .map_err(DbError::query(op))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(DbError::query("scan attendee"))?;

    Ok(rows)
}

fn attendee_from_row(row: &Row<'_>) -> rusqlite::Result<Attendee> {
    Ok(Attendee {
        id: row.get(0)?,
        user_id: row.get(1)?,
        event_id: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_and_dangling_rows_are_allowed() {
        let db = Database::open_in_memory().unwrap();
        db.insert_attendee(1, 10).unwrap();
        db.insert_attendee(1, 10).unwrap();
        // Neither user 1 nor event 10 exist.
        assert_eq!(db.get_attendees().unwrap().len(), 2);
    }

    #[test]
    fn test_get_by_event_filters() {
        let db = Database::open_in_memory().unwrap();
        db.insert_attendee(1, 10).unwrap();
        db.insert_attendee(2, 10).unwrap();
        db.insert_attendee(3, 11).unwrap();

        let mut users: Vec<i64> = db
            .get_attendees_by_event(10)
            .unwrap()
            .iter()
            .map(|a| a.user_id)
            .collect();
        users.sort_unstable();
        assert_eq!(users, vec![1, 2]);

        assert!(db.get_attendees_by_event(99).unwrap().is_empty());
    }

    #[test]
    fn test_update_and_delete() {
        let db = Database::open_in_memory().unwrap();
        db.insert_attendee(1, 10).unwrap();
        let id = db.get_attendees().unwrap()[0].id;

        db.update_attendee(id, 5, 50).unwrap();
        assert_eq!(
            db.get_attendee(id).unwrap(),
            Attendee { id, user_id: 5, event_id: 50 }
        );

        db.delete_attendee(id).unwrap();
        assert!(db.get_attendee(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_missing_attendee_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_attendees().unwrap().is_empty());
        assert!(db.update_attendee(3, 1, 1).unwrap_err().is_not_found());
        assert!(db.delete_attendee(3).unwrap_err().is_not_found());
    }
}

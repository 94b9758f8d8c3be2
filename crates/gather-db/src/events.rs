use gather_types::models::Event;
use rusqlite::{Connection, Row, params};

use crate::error::{SingleRowExt, ensure_affected};
use crate::{Database, DbError, Result};

const ENTITY: &str = "event";

const SELECT_EVENT: &str = "SELECT id, owner_id, name, description, date, location FROM events";

impl Database {
    // -- Events --

    /// Stores `event` (its `id` is ignored) and returns it with the assigned id.
    pub fn insert_event(&self, event: &Event) -> Result<Event> {
        self.with_conn(|conn| {
            let id = conn
                .query_row(
                    "INSERT INTO events (owner_id, name, description, date, location)
                     VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
                    params![
                        event.owner_id,
                        event.name,
                        event.description,
                        event.date,
                        event.location
                    ],
                    |row| row.get(0),
                )
                .map_err(DbError::query("insert event"))?;

            Ok(Event {
                id,
                ..event.clone()
            })
        })
    }

    pub fn get_events(&self) -> Result<Vec<Event>> {
        self.with_conn(query_events)
    }

    pub fn get_event(&self, id: i64) -> Result<Event> {
        self.with_conn(|conn| {
            conn.query_row(&format!("{SELECT_EVENT} WHERE id = ?1"), [id], event_from_row)
                .single(ENTITY, "get event")
        })
    }

    /// Overwrites every column of the row with `event`'s fields.
    pub fn update_event(&self, id: i64, event: &Event) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn
                .execute(
                    "UPDATE events
                     SET owner_id = ?1, name = ?2, description = ?3, date = ?4, location = ?5
                     WHERE id = ?6",
                    params![
                        event.owner_id,
                        event.name,
                        event.description,
                        event.date,
                        event.location,
                        id
                    ],
                )
                .map_err(DbError::query("update event"))?;
            ensure_affected(affected, ENTITY)
        })
    }

    pub fn delete_event(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn
                .execute("DELETE FROM events WHERE id = ?1", [id])
                .map_err(DbError::query("delete event"))?;
            ensure_affected(affected, ENTITY)
        })
    }
}

fn query_events(conn: &Connection) -> Result<Vec<Event>> {
    let mut stmt = conn
        .prepare(SELECT_EVENT)
        .map_err(DbError::query("query events"))?;

    let rows = stmt
        .query_map([], event_from_row)
        .map_err(DbError::query("query events"))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(DbError::query("scan event"))?;

    Ok(rows)
}

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        date: row.get(4)?,
        location: row.get(5)?,
    })
}

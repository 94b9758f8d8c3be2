use gather_types::models::User;
use rusqlite::{Connection, Row, params};

use crate::error::{SingleRowExt, ensure_affected};
use crate::{Database, DbError, Result, UserCredentials};

const ENTITY: &str = "user";

impl Database {
    // -- Users --

    /// Stores a new user and returns it with the store-assigned id.
    pub fn insert_user(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        self.with_conn(|conn| {
            let id = conn
                .query_row(
                    "INSERT INTO users (name, email, password) VALUES (?1, ?2, ?3) RETURNING id",
                    params![name, email, password_hash],
                    |row| row.get(0),
                )
                .map_err(DbError::query("insert user"))?;

            Ok(User {
                id,
                name: name.to_string(),
                email: email.to_string(),
            })
        })
    }

    pub fn get_users(&self) -> Result<Vec<User>> {
        self.with_conn(query_users)
    }

    pub fn get_user(&self, id: i64) -> Result<User> {
        self.with_conn(|conn| {
            conn.query_row("SELECT id, name, email FROM users WHERE id = ?1", [id], user_from_row)
                .single(ENTITY, "get user")
        })
    }

    /// Login path only. Includes the password hash.
    pub fn get_user_by_email(&self, email: &str) -> Result<UserCredentials> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, email, password FROM users WHERE email = ?1",
                [email],
                |row| {
                    Ok(UserCredentials {
                        user: user_from_row(row)?,
                        password_hash: row.get(3)?,
                    })
                },
            )
            .single(ENTITY, "get user by email")
        })
    }

    /// Replaces name and email. The password is not touched.
    pub fn update_user(&self, id: i64, name: &str, email: &str) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn
                .execute(
                    "UPDATE users SET name = ?1, email = ?2 WHERE id = ?3",
                    params![name, email, id],
                )
                .map_err(DbError::query("update user"))?;
            ensure_affected(affected, ENTITY)
        })
    }

    pub fn delete_user(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn
                .execute("DELETE FROM users WHERE id = ?1", [id])
                .map_err(DbError::query("delete user"))?;
            ensure_affected(affected, ENTITY)
        })
    }
}

fn query_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn
        .prepare("SELECT id, name, email FROM users")
        .map_err(DbError::query("query users"))?;

    let rows = stmt
        .query_map([], user_from_row)
        .map_err(DbError::query("query users"))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(DbError::query("scan user"))?;

    Ok(rows)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let db = db();
        let ann = db.insert_user("Ann", "ann@x.com", "hash-a").unwrap();
        let bob = db.insert_user("Bob", "bob@x.com", "hash-b").unwrap();

        assert!(ann.id > 0);
        assert!(bob.id > ann.id);
        assert_eq!(db.get_user(ann.id).unwrap(), ann);
    }

    #[test]
    fn test_get_all_on_empty_table() {
        assert!(db().get_users().unwrap().is_empty());
    }

    #[test]
    fn test_get_by_email_returns_hash() {
        let db = db();
        let ann = db.insert_user("Ann", "ann@x.com", "stored-hash").unwrap();

        let creds = db.get_user_by_email("ann@x.com").unwrap();
        assert_eq!(creds.user, ann);
        assert_eq!(creds.password_hash, "stored-hash");

        let err = db.get_user_by_email("nobody@x.com").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_keeps_password() {
        let db = db();
        let ann = db.insert_user("Ann", "ann@x.com", "stored-hash").unwrap();

        db.update_user(ann.id, "Annie", "annie@x.com").unwrap();

        let creds = db.get_user_by_email("annie@x.com").unwrap();
        assert_eq!(creds.user.name, "Annie");
        assert_eq!(creds.password_hash, "stored-hash");
    }

    #[test]
    fn test_missing_user_is_not_found() {
        let db = db();
        assert!(db.get_user(42).unwrap_err().is_not_found());
        assert!(db.update_user(42, "x", "y").unwrap_err().is_not_found());
        assert!(db.delete_user(42).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_removes_row() {
        let db = db();
        let ann = db.insert_user("Ann", "ann@x.com", "h").unwrap();
        db.delete_user(ann.id).unwrap();

        assert!(db.get_user(ann.id).unwrap_err().is_not_found());
        assert!(db.delete_user(ann.id).unwrap_err().is_not_found());
    }
}

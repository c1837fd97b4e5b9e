//! User operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::User;

impl Database {
    /// Create a user, or update the display name if the id exists
    pub fn upsert_user(&self, id: &str, display_name: Option<&str>) -> Result<User> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::InvalidData("user id must not be empty".to_string()));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO users (id, display_name) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET display_name = COALESCE(excluded.display_name, display_name)
            "#,
            params![id, display_name],
        )?;

        self.get_user(id)?
            .ok_or_else(|| Error::NotFound(format!("user {}", id)))
    }

    /// Get a user by id
    pub fn get_user(&self, id: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        match conn.query_row(
            "SELECT id, display_name, created_at FROM users WHERE id = ?",
            params![id],
            |row| {
                let created_at: String = row.get(2)?;
                Ok(User {
                    id: row.get(0)?,
                    display_name: row.get(1)?,
                    created_at: parse_datetime(&created_at),
                })
            },
        ) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all users
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, display_name, created_at FROM users ORDER BY id")?;

        let users = stmt
            .query_map([], |row| {
                let created_at: String = row.get(2)?;
                Ok(User {
                    id: row.get(0)?,
                    display_name: row.get(1)?,
                    created_at: parse_datetime(&created_at),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }
}

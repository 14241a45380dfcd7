//! Direct access to the backend's SQLite store
//!
//! Maintenance escape hatch for repairing test-data drift when
//! API-driven cleanup is insufficient. Only the `storecheck` binary and
//! the authentication suite's login-after-deletion check use this; no
//! fixture goes through it implicitly.

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;

const USER_TABLE: &str = "auth_user";

/// A user row as the maintenance commands report it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Handle on the backend's user table
#[derive(Clone)]
pub struct UserStore {
    conn: Arc<Mutex<Connection>>,
}

impl UserStore {
    /// Open the backend store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        info!("Opened backend store at {:?}", path.as_ref());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory store (for testing)
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the user table when it does not exist yet. The real
    /// backend owns its schema; this only backs in-memory tests.
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {USER_TABLE} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL
            );"
        ))?;
        Ok(())
    }

    /// All user rows ordered by id
    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, username, email FROM {USER_TABLE} ORDER BY id"
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
            })
        })?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    /// Delete a single user by primary key. Returns whether a row was
    /// actually removed.
    pub fn delete_user(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let rows = conn.execute(
            &format!("DELETE FROM {USER_TABLE} WHERE id = ?1"),
            params![id],
        )?;

        if rows > 0 {
            debug!("Deleted user {}", id);
        }
        Ok(rows > 0)
    }

    /// Delete every row except the `keep_first` lowest ids (the seed
    /// accounts). Returns the number of rows removed.
    pub fn prune_users(&self, keep_first: usize) -> Result<usize> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        tx.execute(
            &format!(
                "CREATE TEMP TABLE keep_ids AS
                 SELECT id FROM {USER_TABLE} ORDER BY id LIMIT ?1"
            ),
            params![keep_first as i64],
        )?;
        let removed = tx.execute(
            &format!("DELETE FROM {USER_TABLE} WHERE id NOT IN (SELECT id FROM keep_ids)"),
            [],
        )?;
        tx.execute("DROP TABLE keep_ids", [])?;

        tx.commit()?;
        info!("Pruned {} users, kept first {}", removed, keep_first);
        Ok(removed)
    }

    /// Add a row directly. Used to seed in-memory stores in tests.
    pub fn insert_user(&self, username: &str, email: &str) -> Result<i64> {
        let conn = self.conn.lock();
        conn.execute(
            &format!("INSERT INTO {USER_TABLE} (username, email) VALUES (?1, ?2)"),
            params![username, email],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

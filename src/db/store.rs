//! Data store gateway — one live connection plus the four named collections.
//!
//! A `DataStore` is opened once per operator session. There is no
//! reconnect logic: a failed connect is terminal for that login attempt.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;

use super::sqlite::{open_database, open_memory_database, table_exists};
use crate::models::Collection;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection to {target} failed: {reason}")]
    ConnectionFailed { target: String, reason: String },
}

/// Live store handle owned by one session.
#[derive(Debug)]
pub struct DataStore {
    conn: Connection,
    location: Option<PathBuf>,
}

impl DataStore {
    /// Open the store at `path`, apply migrations and verify the collections.
    pub fn connect(path: &Path) -> Result<Self, GatewayError> {
        let target = path.display().to_string();
        let failed = |reason: String| GatewayError::ConnectionFailed {
            target: target.clone(),
            reason,
        };

        let conn = open_database(path).map_err(|e| failed(e.to_string()))?;
        verify_collections(&conn).map_err(failed)?;

        tracing::info!(store = %target, "Data store connected");
        Ok(Self {
            conn,
            location: Some(path.to_path_buf()),
        })
    }

    /// Private in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, GatewayError> {
        let failed = |reason: String| GatewayError::ConnectionFailed {
            target: ":memory:".into(),
            reason,
        };
        let conn = open_memory_database().map_err(|e| failed(e.to_string()))?;
        verify_collections(&conn).map_err(failed)?;
        Ok(Self {
            conn,
            location: None,
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access, needed to open transactions.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// File backing this store, `None` for in-memory stores.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }
}

fn verify_collections(conn: &Connection) -> Result<(), String> {
    for collection in Collection::ALL {
        let present = table_exists(conn, collection.as_str()).map_err(|e| e.to_string())?;
        if !present {
            return Err(format!("collection {collection} is missing"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_creates_store_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("store.db");
        let store = DataStore::connect(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.location(), Some(path.as_path()));
    }

    #[test]
    fn connect_to_unreachable_path_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing-dir").join("store.db");
        let err = DataStore::connect(&path).err().unwrap();
        assert!(matches!(err, GatewayError::ConnectionFailed { .. }));
    }

    #[test]
    fn connect_rejects_foreign_database() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("other.db");
        {
            // Claims schema v1 but lacks the collections.
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE schema_version (version INTEGER PRIMARY KEY, applied_at TEXT);
                 INSERT INTO schema_version (version, applied_at) VALUES (1, 'x');",
            )
            .unwrap();
        }
        let err = DataStore::connect(&path).err().unwrap();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn in_memory_store_has_no_location() {
        let store = DataStore::open_in_memory().unwrap();
        assert!(store.location().is_none());
    }
}

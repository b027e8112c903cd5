//! SQLite note table

use crate::error::{NotesError, Result};
use futures::stream::{BoxStream, StreamExt};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT,
    content     TEXT NOT NULL,
    image_uri   TEXT,
    created_at  INTEGER NOT NULL,
    updated_at  INTEGER NOT NULL
);
";

const SELECT_COLUMNS: &str = "SELECT id, title, content, image_uri, created_at, updated_at FROM notes";

/// One row of the `notes` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: i64,
    pub title: Option<String>,
    pub content: String,
    pub image_uri: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl NoteRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(NoteRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            image_uri: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

/// Local note store
///
/// Every successful write bumps a change counter; `observe_all` re-queries the
/// table whenever the counter moves.
pub struct NoteDatabase {
    conn: Mutex<Connection>,
    changes: watch::Sender<u64>,
}

impl NoteDatabase {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening note database");
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        let (changes, _) = watch::channel(0);
        Ok(NoteDatabase {
            conn: Mutex::new(conn),
            changes,
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| NotesError::Background("note database lock poisoned".to_string()))
    }

    fn notify(&self) {
        self.changes.send_modify(|version| *version += 1);
    }

    /// All rows in insertion order
    pub fn get_all(&self) -> Result<Vec<NoteRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;
        let records = stmt
            .query_map([], NoteRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Stream of the full table: the current rows first, then again after every write
    pub fn observe_all(self: &Arc<Self>) -> BoxStream<'static, Result<Vec<NoteRecord>>> {
        let db = Arc::clone(self);
        WatchStream::new(self.changes.subscribe())
            .then(move |_| {
                let db = Arc::clone(&db);
                async move {
                    tokio::task::spawn_blocking(move || db.get_all())
                        .await
                        .map_err(|e| NotesError::Background(e.to_string()))?
                }
            })
            .boxed()
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<NoteRecord>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                NoteRecord::from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Insert when `record.id` is 0, otherwise replace the row with that id
    pub fn upsert(&self, record: &NoteRecord) -> Result<i64> {
        let id = {
            let conn = self.conn()?;
            if record.id == 0 {
                conn.execute(
                    "INSERT INTO notes (title, content, image_uri, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        record.title,
                        record.content,
                        record.image_uri,
                        record.created_at,
                        record.updated_at
                    ],
                )?;
                conn.last_insert_rowid()
            } else {
                conn.execute(
                    "INSERT OR REPLACE INTO notes (id, title, content, image_uri, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        record.id,
                        record.title,
                        record.content,
                        record.image_uri,
                        record.created_at,
                        record.updated_at
                    ],
                )?;
                record.id
            }
        };
        debug!(id, "upserted note");
        self.notify();
        Ok(id)
    }

    /// Remove the row sharing `record.id`; missing rows are ignored
    pub fn delete(&self, record: &NoteRecord) -> Result<()> {
        let removed = self
            .conn()?
            .execute("DELETE FROM notes WHERE id = ?1", params![record.id])?;
        debug!(id = record.id, removed, "deleted note");
        if removed > 0 {
            self.notify();
        }
        Ok(())
    }
}

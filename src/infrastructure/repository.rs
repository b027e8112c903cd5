//! Local repository combining the note table and the image store

use crate::domain::{Note, NoteId, NoteRepository, NoteStream};
use crate::error::Result;
use crate::infrastructure::database::{NoteDatabase, NoteRecord};
use crate::infrastructure::FileStore;
use futures::StreamExt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        Note {
            id: NoteId(record.id),
            title: record.title,
            content: record.content,
            image_uri: record.image_uri,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        NoteRecord {
            id: note.id.0,
            title: note.title.clone(),
            content: note.content.clone(),
            image_uri: note.image_uri.clone(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// On-device implementation of NoteRepository
pub struct LocalNoteRepository {
    database: Arc<NoteDatabase>,
    files: FileStore,
}

impl LocalNoteRepository {
    pub fn new(database: Arc<NoteDatabase>, files: FileStore) -> Self {
        LocalNoteRepository { database, files }
    }
}

impl NoteRepository for LocalNoteRepository {
    fn observe_notes(&self) -> NoteStream {
        self.database
            .observe_all()
            .map(|records| records.map(|rs| rs.into_iter().map(Note::from).collect()))
            .boxed()
    }

    fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        Ok(self.database.get_by_id(id.0)?.map(Note::from))
    }

    fn add_or_update(&self, note: &Note) -> Result<NoteId> {
        self.database.upsert(&NoteRecord::from(note)).map(NoteId)
    }

    fn delete(&self, note: &Note) -> Result<()> {
        self.database.delete(&NoteRecord::from(note))?;
        if let Some(path) = &note.image_uri {
            self.files.delete(path);
        }
        info!(id = %note.id, "note deleted");
        Ok(())
    }

    fn save_image(&self, source: &Path) -> Result<String> {
        self.files.save(source)
    }
}

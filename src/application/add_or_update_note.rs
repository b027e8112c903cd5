//! Add or update note use case

use super::in_background;
use crate::domain::{Note, NoteId, NoteRepository};
use crate::error::{NotesError, Result, BLANK_NOTE_MESSAGE};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct AddOrUpdateNote {
    repository: Arc<dyn NoteRepository>,
}

impl AddOrUpdateNote {
    pub fn new(repository: Arc<dyn NoteRepository>) -> Self {
        AddOrUpdateNote { repository }
    }

    /// Persist `note`, rejecting it when both title and content are blank
    pub async fn execute(&self, note: Note) -> Result<NoteId> {
        if note.is_blank() {
            debug!(id = %note.id, "rejected blank note");
            return Err(NotesError::InvalidNote(BLANK_NOTE_MESSAGE.to_string()));
        }

        let repository = Arc::clone(&self.repository);
        in_background(move || repository.add_or_update(&note)).await
    }
}

//! Get note by id use case

use super::in_background;
use crate::domain::{Note, NoteId, NoteRepository};
use crate::error::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct GetNoteById {
    repository: Arc<dyn NoteRepository>,
}

impl GetNoteById {
    pub fn new(repository: Arc<dyn NoteRepository>) -> Self {
        GetNoteById { repository }
    }

    pub async fn execute(&self, id: NoteId) -> Result<Option<Note>> {
        let repository = Arc::clone(&self.repository);
        in_background(move || repository.get_note(id)).await
    }
}

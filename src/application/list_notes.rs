//! List notes use case

use crate::domain::{NoteRepository, NoteStream};
use std::sync::Arc;

#[derive(Clone)]
pub struct ListNotes {
    repository: Arc<dyn NoteRepository>,
}

impl ListNotes {
    pub fn new(repository: Arc<dyn NoteRepository>) -> Self {
        ListNotes { repository }
    }

    /// Live list of every note, as produced by the repository
    pub fn execute(&self) -> NoteStream {
        self.repository.observe_notes()
    }
}

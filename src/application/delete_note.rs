//! Delete note use case

use super::in_background;
use crate::domain::{Note, NoteRepository};
use crate::error::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct DeleteNote {
    repository: Arc<dyn NoteRepository>,
}

impl DeleteNote {
    pub fn new(repository: Arc<dyn NoteRepository>) -> Self {
        DeleteNote { repository }
    }

    pub async fn execute(&self, note: Note) -> Result<()> {
        let repository = Arc::clone(&self.repository);
        in_background(move || repository.delete(&note)).await
    }
}

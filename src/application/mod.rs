//! Application layer - Use cases
//!
//! Each use case wraps one repository call. Blocking storage work runs on
//! tokio's blocking pool so callers on the async side never stall.

pub mod add_or_update_note;
pub mod delete_note;
pub mod get_note;
pub mod list_notes;
pub mod save_image;

#[cfg(test)]
pub(crate) mod testing;

pub use add_or_update_note::AddOrUpdateNote;
pub use delete_note::DeleteNote;
pub use get_note::GetNoteById;
pub use list_notes::ListNotes;
pub use save_image::SaveImage;

use crate::domain::NoteRepository;
use crate::error::{NotesError, Result};
use std::sync::Arc;

/// Run blocking repository work off the async executor
pub(crate) async fn in_background<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| NotesError::Background(e.to_string()))?
}

/// All use cases, wired to one repository
#[derive(Clone)]
pub struct UseCases {
    pub list_notes: ListNotes,
    pub get_note: GetNoteById,
    pub add_or_update_note: AddOrUpdateNote,
    pub delete_note: DeleteNote,
    pub save_image: SaveImage,
}

impl UseCases {
    pub fn new(repository: Arc<dyn NoteRepository>) -> Self {
        UseCases {
            list_notes: ListNotes::new(Arc::clone(&repository)),
            get_note: GetNoteById::new(Arc::clone(&repository)),
            add_or_update_note: AddOrUpdateNote::new(Arc::clone(&repository)),
            delete_note: DeleteNote::new(Arc::clone(&repository)),
            save_image: SaveImage::new(repository),
        }
    }
}

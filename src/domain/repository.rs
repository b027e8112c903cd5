//! Repository contract used by the application layer

use crate::domain::{Note, NoteId};
use crate::error::Result;
use futures::stream::BoxStream;
use std::path::Path;

/// Live sequence of every note; replays the current list to new subscribers
pub type NoteStream = BoxStream<'static, Result<Vec<Note>>>;

/// Abstract note storage
///
/// Methods other than `observe_notes` block on I/O and are expected to be
/// called from a background thread.
pub trait NoteRepository: Send + Sync {
    /// Subscribe to the full note list
    fn observe_notes(&self) -> NoteStream;

    /// Look up a note by id
    fn get_note(&self, id: NoteId) -> Result<Option<Note>>;

    /// Insert a new note or replace the one sharing its id; returns the stored id
    fn add_or_update(&self, note: &Note) -> Result<NoteId>;

    /// Remove a note and its attached image file
    fn delete(&self, note: &Note) -> Result<()>;

    /// Copy an image into private storage and return the stored path
    fn save_image(&self, source: &Path) -> Result<String>;
}

//! Save image use case

use super::in_background;
use crate::domain::NoteRepository;
use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct SaveImage {
    repository: Arc<dyn NoteRepository>,
}

impl SaveImage {
    pub fn new(repository: Arc<dyn NoteRepository>) -> Self {
        SaveImage { repository }
    }

    /// Copy the image at `source` into private storage; returns the stored path
    pub async fn execute(&self, source: PathBuf) -> Result<String> {
        let repository = Arc::clone(&self.repository);
        in_background(move || repository.save_image(&source)).await
    }
}

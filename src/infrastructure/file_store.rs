//! Private image storage

use crate::domain::Clock;
use crate::error::Result;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Extension used when the source file has none
const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Copies attached images into a directory owned by the application
pub struct FileStore {
    images_dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileStore {
    pub fn new(images_dir: PathBuf, clock: Arc<dyn Clock>) -> Self {
        FileStore { images_dir, clock }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Copy `source` into `<images_dir>/<millis>.<ext>` and return the absolute path
    pub fn save(&self, source: &Path) -> Result<String> {
        let mut input = File::open(source)?;
        fs::create_dir_all(&self.images_dir)?;

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_IMAGE_EXTENSION);

        let mut stamp = self.clock.now_millis();
        let (path, mut output) = loop {
            let candidate = self.images_dir.join(format!("{}.{}", stamp, extension));
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(file) => break (candidate, file),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => stamp += 1,
                Err(e) => return Err(e.into()),
            }
        };

        if let Err(e) = io::copy(&mut input, &mut output) {
            // Don't leave a truncated image behind
            let _ = fs::remove_file(&path);
            return Err(e.into());
        }

        let absolute = fs::canonicalize(&path)?;
        debug!(source = %source.display(), stored = %absolute.display(), "saved image");
        Ok(absolute.to_string_lossy().into_owned())
    }

    /// Remove a stored image; a missing file is not an error
    pub fn delete(&self, path: &str) {
        match fs::remove_file(path) {
            Ok(()) => debug!(path, "deleted image"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path, error = %e, "failed to delete image"),
        }
    }
}

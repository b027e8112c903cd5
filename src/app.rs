//! Application wiring
//!
//! The single place where storage, use cases and the clock are constructed.
//! Screens receive what they need from here instead of looking it up.

use crate::application::UseCases;
use crate::domain::{Clock, NoteId, NoteRepository, SystemClock};
use crate::error::Result;
use crate::infrastructure::{Config, FileStore, LocalNoteRepository, NoteDatabase};
use crate::presentation::{NoteEditorViewModel, NoteListViewModel};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub struct App {
    home: PathBuf,
    config: Config,
    clock: Arc<dyn Clock>,
    use_cases: UseCases,
}

impl App {
    /// Open the notes home at `home`, creating it with a default config on first use
    pub fn open(home: &Path) -> Result<Self> {
        Self::open_with_clock(home, Arc::new(SystemClock))
    }

    pub fn open_with_clock(home: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        let config = Config::load_from_dir(home)?;
        if !home.join("config.toml").exists() {
            config.save_to_dir(home)?;
        }

        let database = Arc::new(NoteDatabase::open(&config.database_path(home))?);
        let files = FileStore::new(config.images_path(home), Arc::clone(&clock));
        let repository: Arc<dyn NoteRepository> =
            Arc::new(LocalNoteRepository::new(database, files));

        info!(home = %home.display(), "notes home opened");

        Ok(App {
            home: home.to_path_buf(),
            config,
            clock,
            use_cases: UseCases::new(repository),
        })
    }

    /// Open the home found through SIMPLENOTES_HOME or the default location
    pub fn discover() -> Result<Self> {
        Self::open(&Config::discover_home()?)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn use_cases(&self) -> &UseCases {
        &self.use_cases
    }

    /// List screen; starts observing notes immediately
    pub fn list_screen(&self) -> NoteListViewModel {
        NoteListViewModel::new(&self.use_cases)
    }

    /// Editor screen for `id`, or for a new note
    pub async fn editor_screen(&self, id: Option<NoteId>) -> NoteEditorViewModel {
        NoteEditorViewModel::new(&self.use_cases, Arc::clone(&self.clock), id).await
    }
}

//! Configuration management

use crate::error::{NotesError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at the notes home directory
pub const HOME_ENV: &str = "SIMPLENOTES_HOME";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file, relative to the home directory unless absolute
    pub database_file: PathBuf,
    /// Directory for attached images, relative to the home directory unless absolute
    pub images_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_file: PathBuf::from("notes.db"),
            images_dir: PathBuf::from("images"),
        }
    }
}

impl Config {
    /// Load config from config.toml in the given directory, falling back to defaults
    pub fn load_from_dir(home: &Path) -> Result<Self> {
        let config_path = home.join(CONFIG_FILE);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(NotesError::Io(e)),
        };

        toml::from_str(&contents)
            .map_err(|e| NotesError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to config.toml in the given directory
    pub fn save_to_dir(&self, home: &Path) -> Result<()> {
        if !home.exists() {
            fs::create_dir_all(home)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(home.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    pub fn database_path(&self, home: &Path) -> PathBuf {
        home.join(&self.database_file)
    }

    pub fn images_path(&self, home: &Path) -> PathBuf {
        home.join(&self.images_dir)
    }

    /// Resolve the home directory: SIMPLENOTES_HOME first, then ~/.simplenotes
    pub fn discover_home() -> Result<PathBuf> {
        if let Ok(home) = std::env::var(HOME_ENV) {
            if home.trim().is_empty() {
                return Err(NotesError::Config(format!("{} is set but empty", HOME_ENV)));
            }
            return Ok(PathBuf::from(home));
        }

        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".simplenotes"))
            .ok_or_else(|| {
                NotesError::Config(format!(
                    "Cannot locate a home directory; set {} explicitly",
                    HOME_ENV
                ))
            })
    }
}

//! Error types for simplenotes

use thiserror::Error;

/// Message returned when a note has neither a title nor content.
pub const BLANK_NOTE_MESSAGE: &str = "Note must have at least a title or content";

/// Main error type for simplenotes
#[derive(Debug, Error)]
pub enum NotesError {
    /// Validation failure; the message is shown to the user verbatim.
    #[error("{0}")]
    InvalidNote(String),

    #[error("Note not found: {0}")]
    NotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Background task failed: {0}")]
    Background(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// A screen answered with a message instead of completing the action.
    #[error("{0}")]
    Rejected(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl NotesError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NotesError::InvalidNote(_) => 3,
            NotesError::NotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            NotesError::InvalidNote(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Pass a title: simplenotes new --title 'Groceries'\n\
                    • Or pass some content: simplenotes new --content 'milk, eggs'",
                    msg
                )
            }
            NotesError::NotFound(id) => {
                format!(
                    "Note not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'simplenotes list' to see existing note ids",
                    id
                )
            }
            NotesError::InvalidRoute(route) => {
                format!(
                    "Invalid route: '{}'\n\n\
                    Valid routes:\n\
                    • notes_list\n\
                    • note_editor?noteId=<id>\n\
                    • note_editor?noteId=-1 (new note)",
                    route
                )
            }
            NotesError::Config(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check config.toml in your notes home directory\n\
                    • Set SIMPLENOTES_HOME to a writable directory",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using NotesError
pub type Result<T> = std::result::Result<T, NotesError>;

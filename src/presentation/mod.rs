//! Presentation layer - Screen view-models and navigation

pub mod navigation;
pub mod note_editor;
pub mod note_list;
pub mod state;

pub use navigation::Route;
pub use note_editor::{NoteEditorEffect, NoteEditorEvent, NoteEditorState, NoteEditorViewModel};
pub use note_list::{NoteListEffect, NoteListEvent, NoteListState, NoteListViewModel};
pub use state::{distinct_until_changed, EffectChannel, StateFlow};

/// Message shown when a screen is asked about an id it does not know
pub const NOTE_NOT_FOUND: &str = "Note not found";

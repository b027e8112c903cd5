//! Note editor screen

use crate::application::{AddOrUpdateNote, DeleteNote, GetNoteById, SaveImage, UseCases};
use crate::domain::{Clock, Note, NoteId};
use crate::error::NotesError;
use crate::presentation::navigation::Route;
use crate::presentation::NOTE_NOT_FOUND;
use crate::presentation::state::{EffectChannel, StateFlow};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEditorState {
    pub note: Note,
    /// Set while a repository call is in flight
    pub is_saving: bool,
    pub error: Option<String>,
}

impl NoteEditorState {
    fn new(now: i64) -> Self {
        NoteEditorState {
            note: Note::empty(now),
            is_saving: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteEditorEvent {
    /// Show the note with this id, or a fresh note when `None`
    Load(Option<NoteId>),
    TitleChanged(String),
    ContentChanged(String),
    /// Image picked by the user; copied into private storage
    AttachImage(PathBuf),
    /// Forget the attached image. The stored file is left in place.
    ClearImage,
    Save,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteEditorEffect {
    BackToList,
    ShowToast(String),
}

impl NoteEditorEffect {
    pub fn route(&self) -> Option<Route> {
        match self {
            NoteEditorEffect::BackToList => Some(Route::List),
            NoteEditorEffect::ShowToast(_) => None,
        }
    }
}

/// View-model for creating, editing and deleting a single note
pub struct NoteEditorViewModel {
    get_note: GetNoteById,
    add_or_update_note: AddOrUpdateNote,
    delete_note: DeleteNote,
    save_image: SaveImage,
    clock: Arc<dyn Clock>,
    state: StateFlow<NoteEditorState>,
    effects: EffectChannel<NoteEditorEffect>,
}

impl NoteEditorViewModel {
    /// Open the editor, loading `note_id` when given
    pub async fn new(use_cases: &UseCases, clock: Arc<dyn Clock>, note_id: Option<NoteId>) -> Self {
        let view_model = NoteEditorViewModel {
            get_note: use_cases.get_note.clone(),
            add_or_update_note: use_cases.add_or_update_note.clone(),
            delete_note: use_cases.delete_note.clone(),
            save_image: use_cases.save_image.clone(),
            state: StateFlow::new(NoteEditorState::new(clock.now_millis())),
            clock,
            effects: EffectChannel::new(),
        };
        view_model.load(note_id).await;
        view_model
    }

    pub fn state(&self) -> watch::Receiver<NoteEditorState> {
        self.state.subscribe()
    }

    pub fn current_state(&self) -> NoteEditorState {
        self.state.value()
    }

    pub fn effects(&self) -> broadcast::Receiver<NoteEditorEffect> {
        self.effects.subscribe()
    }

    pub async fn on_event(&self, event: NoteEditorEvent) {
        debug!(?event, "note editor event");
        match event {
            NoteEditorEvent::Load(id) => self.load(id).await,
            NoteEditorEvent::TitleChanged(title) => self.update_note(|n| Note {
                title: Some(title),
                ..n.clone()
            }),
            NoteEditorEvent::ContentChanged(content) => self.update_note(|n| Note {
                content,
                ..n.clone()
            }),
            NoteEditorEvent::AttachImage(source) => self.attach_image(source).await,
            NoteEditorEvent::ClearImage => self.update_note(|n| Note {
                image_uri: None,
                ..n.clone()
            }),
            NoteEditorEvent::Save => self.save().await,
            NoteEditorEvent::Delete => self.delete().await,
        }
    }

    async fn load(&self, id: Option<NoteId>) {
        let Some(id) = id else {
            let fresh = Note::empty(self.clock.now_millis());
            self.state.update(|s| NoteEditorState {
                note: fresh,
                error: None,
                ..s.clone()
            });
            return;
        };

        let (note, error) = match self.get_note.execute(id).await {
            Ok(Some(note)) => (note, None),
            Ok(None) => (
                Note::empty(self.clock.now_millis()),
                Some(NOTE_NOT_FOUND.to_string()),
            ),
            Err(e) => {
                warn!(%id, error = %e, "failed to load note");
                (
                    Note::empty(self.clock.now_millis()),
                    Some(format!("Failed to load note: {}", e)),
                )
            }
        };
        self.state.update(|s| NoteEditorState {
            note,
            error,
            ..s.clone()
        });
    }

    fn update_note(&self, transform: impl FnOnce(&Note) -> Note) {
        self.state.update(|s| NoteEditorState {
            note: transform(&s.note),
            ..s.clone()
        });
    }

    fn set_saving(&self, is_saving: bool) {
        self.state.update(|s| NoteEditorState {
            is_saving,
            ..s.clone()
        });
    }

    fn toast(&self, text: String) {
        self.effects.emit(NoteEditorEffect::ShowToast(text));
    }

    async fn attach_image(&self, source: PathBuf) {
        self.set_saving(true);
        match self.save_image.execute(source).await {
            Ok(stored) => self.update_note(|n| Note {
                image_uri: Some(stored),
                ..n.clone()
            }),
            Err(e) => {
                warn!(error = %e, "failed to attach image");
                self.toast(format!("Failed to attach image: {}", e));
            }
        }
        self.set_saving(false);
    }

    async fn save(&self) {
        self.set_saving(true);
        let note = self.state.value().note.stamped_for_save(self.clock.now_millis());

        match self.add_or_update_note.execute(note.clone()).await {
            Ok(id) => {
                info!(%id, "note saved");
                self.update_note(|_| Note { id, ..note });
                self.effects.emit(NoteEditorEffect::BackToList);
            }
            Err(NotesError::InvalidNote(msg)) => self.toast(msg),
            Err(e) => {
                warn!(error = %e, "failed to save note");
                self.toast(format!("Save failed: {}", e));
            }
        }
        self.set_saving(false);
    }

    async fn delete(&self) {
        let note = self.state.value().note;
        if note.id.is_unset() {
            self.toast("No note to delete".to_string());
            return;
        }

        self.set_saving(true);
        match self.delete_note.execute(note).await {
            Ok(()) => self.effects.emit(NoteEditorEffect::BackToList),
            Err(e) => {
                warn!(error = %e, "failed to delete note");
                self.toast(format!("Delete failed: {}", e));
            }
        }
        self.set_saving(false);
    }
}

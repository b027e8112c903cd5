//! Terminal rendering of the list and editor screens
//!
//! Each command opens a screen through `App`, feeds it the events a user
//! would produce, and turns the resulting state or effects into text.

use crate::app::App;
use crate::cli::commands::NoteFields;
use crate::cli::output::{format_note, format_note_list};
use crate::domain::NoteId;
use crate::error::{NotesError, Result, BLANK_NOTE_MESSAGE};
use crate::presentation::{
    NoteEditorEffect, NoteEditorEvent, NoteEditorViewModel, NoteListEffect, NoteListEvent,
    NoteListState, NoteListViewModel, Route, NOTE_NOT_FOUND,
};
use tokio::sync::broadcast;

async fn settled_list(app: &App) -> Result<(NoteListViewModel, NoteListState)> {
    let screen = app.list_screen();
    let state = screen
        .state()
        .wait_for(|s| !s.is_loading)
        .await
        .map_err(|e| NotesError::Background(e.to_string()))?
        .clone();

    if let Some(error) = state.error {
        return Err(NotesError::Rejected(error));
    }
    Ok((screen, state))
}

async fn open_editor(app: &App, id: Option<NoteId>) -> Result<NoteEditorViewModel> {
    let screen = app.editor_screen(id).await;
    match (screen.current_state().error, id) {
        (None, _) => Ok(screen),
        (Some(error), Some(id)) if error == NOTE_NOT_FOUND => Err(NotesError::NotFound(id.0)),
        (Some(error), _) => Err(NotesError::Rejected(error)),
    }
}

/// Drain pending editor effects, failing with the first toast among them
fn take_effects(
    effects: &mut broadcast::Receiver<NoteEditorEffect>,
) -> Result<Vec<NoteEditorEffect>> {
    let emitted: Vec<_> = std::iter::from_fn(|| effects.try_recv().ok()).collect();
    match emitted.iter().find_map(|effect| match effect {
        NoteEditorEffect::ShowToast(text) => Some(text.clone()),
        NoteEditorEffect::BackToList => None,
    }) {
        Some(text) if text == BLANK_NOTE_MESSAGE => Err(NotesError::InvalidNote(text)),
        Some(text) => Err(NotesError::Rejected(text)),
        None => Ok(emitted),
    }
}

/// `list`: every note, as text or JSON
pub async fn list(app: &App, json: bool) -> Result<String> {
    let (_screen, state) = settled_list(app).await?;

    if json {
        serde_json::to_string_pretty(&state.notes)
            .map(|mut out| {
                out.push('\n');
                out
            })
            .map_err(|e| NotesError::Background(format!("Failed to encode notes: {}", e)))
    } else {
        Ok(format_note_list(&state.notes))
    }
}

/// `show`: one note with its content
pub async fn show(app: &App, id: NoteId) -> Result<String> {
    let screen = open_editor(app, Some(id)).await?;
    Ok(format_note(&screen.current_state().note))
}

/// `new` / `edit`: apply field changes in the editor, then save
pub async fn edit(
    app: &App,
    id: Option<NoteId>,
    fields: NoteFields,
    clear_image: bool,
) -> Result<String> {
    let screen = open_editor(app, id).await?;
    let mut effects = screen.effects();

    if let Some(title) = fields.title {
        screen.on_event(NoteEditorEvent::TitleChanged(title)).await;
    }
    if let Some(content) = fields.content {
        screen.on_event(NoteEditorEvent::ContentChanged(content)).await;
    }
    if clear_image {
        screen.on_event(NoteEditorEvent::ClearImage).await;
    }
    if let Some(image) = fields.image {
        screen.on_event(NoteEditorEvent::AttachImage(image)).await;
        take_effects(&mut effects)?;
    }

    screen.on_event(NoteEditorEvent::Save).await;
    let emitted = take_effects(&mut effects)?;
    if !emitted.iter().any(|e| e.route() == Some(Route::List)) {
        return Err(NotesError::Rejected("Note was not saved".to_string()));
    }

    Ok(format!("Saved note {}\n", screen.current_state().note.id))
}

/// `delete`: confirm deletion from the list screen
pub async fn delete(app: &App, id: NoteId) -> Result<String> {
    let (screen, _) = settled_list(app).await?;
    let mut effects = screen.effects();

    screen.on_event(NoteListEvent::ConfirmDelete(id)).await;

    match effects.recv().await {
        Ok(NoteListEffect::ShowToast(text)) if text == "Note deleted successfully" => {
            Ok(format!("{}\n", text))
        }
        Ok(NoteListEffect::ShowToast(text)) if text == NOTE_NOT_FOUND => {
            Err(NotesError::NotFound(id.0))
        }
        Ok(NoteListEffect::ShowToast(text)) => Err(NotesError::Rejected(text)),
        Ok(other) => Err(NotesError::Background(format!(
            "Unexpected list effect: {:?}",
            other
        ))),
        Err(e) => Err(NotesError::Background(e.to_string())),
    }
}

/// `open`: render whichever screen a route points at
pub async fn open(app: &App, route: &str) -> Result<String> {
    match route.parse::<Route>()? {
        Route::List => list(app, false).await,
        Route::Editor(Some(id)) => show(app, id).await,
        Route::Editor(None) => {
            let screen = open_editor(app, None).await?;
            Ok(format_note(&screen.current_state().note))
        }
    }
}

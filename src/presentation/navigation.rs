//! Navigation routes between the two screens

use crate::domain::NoteId;
use crate::error::NotesError;
use std::fmt;
use std::str::FromStr;

const LIST_ROUTE: &str = "notes_list";
const EDITOR_ROUTE: &str = "note_editor";
const NOTE_ID_PARAM: &str = "noteId";
/// Route parameter value meaning "no id, create a new note"
const NEW_NOTE_SENTINEL: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    /// Editor for an existing note, or a new one when `None`
    Editor(Option<NoteId>),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "{}", LIST_ROUTE),
            Route::Editor(id) => write!(
                f,
                "{}?{}={}",
                EDITOR_ROUTE,
                NOTE_ID_PARAM,
                id.map_or(NEW_NOTE_SENTINEL, |id| id.0)
            ),
        }
    }
}

impl FromStr for Route {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NotesError::InvalidRoute(s.to_string());
        let s = s.trim();

        if s == LIST_ROUTE {
            return Ok(Route::List);
        }

        let (path, query) = s.split_once('?').unwrap_or((s, ""));
        if path != EDITOR_ROUTE {
            return Err(invalid());
        }

        let mut id = NEW_NOTE_SENTINEL;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((NOTE_ID_PARAM, value)) => {
                    id = value.parse().map_err(|_| invalid())?;
                }
                Some(_) => {}
                None => return Err(invalid()),
            }
        }

        match id {
            NEW_NOTE_SENTINEL => Ok(Route::Editor(None)),
            id if id > 0 => Ok(Route::Editor(Some(NoteId(id)))),
            _ => Err(invalid()),
        }
    }
}

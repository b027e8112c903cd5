//! Note entity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a persisted note; `NoteId::UNSET` marks a note that was never saved
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl NoteId {
    pub const UNSET: NoteId = NoteId(0);

    pub fn is_unset(self) -> bool {
        self == Self::UNSET
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(NoteId)
            .map_err(|_| format!("Invalid note id: '{}'", s))
    }
}

/// A text note with an optional attached image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: Option<String>,
    pub content: String,
    pub image_uri: Option<String>,
    /// Milliseconds since epoch, set on first save
    pub created_at: i64,
    /// Milliseconds since epoch, refreshed on every save
    pub updated_at: i64,
}

impl Note {
    /// Fresh, unsaved note as shown by an editor opened without an id
    pub fn empty(now: i64) -> Self {
        Note {
            id: NoteId::UNSET,
            title: None,
            content: String::new(),
            image_uri: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when both the title (absent counts as blank) and the content are blank
    pub fn is_blank(&self) -> bool {
        let title_blank = self
            .title
            .as_deref()
            .map_or(true, |title| title.trim().is_empty());
        title_blank && self.content.trim().is_empty()
    }

    /// Stamp timestamps for a save at `now`; `created_at` only moves for unsaved notes
    pub fn stamped_for_save(&self, now: i64) -> Self {
        Note {
            created_at: if self.id.is_unset() {
                now
            } else {
                self.created_at
            },
            updated_at: now,
            ..self.clone()
        }
    }

    /// Title for display, falling back to the first content line
    pub fn display_title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => self.content.lines().next().unwrap_or("").trim(),
        }
    }
}

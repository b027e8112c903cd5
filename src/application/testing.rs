//! In-memory repository double shared by use case and view-model tests

use crate::domain::{Note, NoteId, NoteRepository, NoteStream};
use crate::error::{NotesError, Result};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RepoCall {
    Observe,
    Get(NoteId),
    AddOrUpdate(Note),
    Delete(Note),
    SaveImage(PathBuf),
}

/// One scripted item of the live note stream
#[derive(Debug, Clone)]
pub(crate) enum Emission {
    Notes(Vec<Note>),
    Fail(String),
}

#[derive(Default)]
pub(crate) struct FakeRepository {
    notes: Mutex<Vec<Note>>,
    calls: Mutex<Vec<RepoCall>>,
    emissions: Mutex<Option<Vec<Emission>>>,
    failure: Mutex<Option<String>>,
    image_path: Mutex<Option<String>>,
    hold_open: Mutex<bool>,
    delete_gate: Mutex<Option<mpsc::Receiver<()>>>,
}

pub(crate) fn note(id: i64, title: Option<&str>, content: &str) -> Note {
    Note {
        id: NoteId(id),
        title: title.map(str::to_string),
        content: content.to_string(),
        image_uri: None,
        created_at: 1_000,
        updated_at: 2_000,
    }
}

fn io_failure(msg: &str) -> NotesError {
    NotesError::Io(std::io::Error::new(std::io::ErrorKind::Other, msg.to_string()))
}

impl FakeRepository {
    pub(crate) fn with_notes(notes: Vec<Note>) -> Self {
        let repo = FakeRepository::default();
        *repo.notes.lock().unwrap() = notes;
        repo
    }

    pub(crate) fn with_emissions(emissions: Vec<Emission>) -> Self {
        let repo = FakeRepository::default();
        *repo.emissions.lock().unwrap() = Some(emissions);
        repo
    }

    /// Every call except `observe_notes` fails with an I/O error carrying `msg`
    pub(crate) fn failing(msg: &str) -> Self {
        let repo = FakeRepository::default();
        repo.set_failure(Some(msg));
        repo
    }

    pub(crate) fn set_failure(&self, msg: Option<&str>) {
        *self.failure.lock().unwrap() = msg.map(str::to_string);
    }

    pub(crate) fn set_image_path(&self, path: &str) {
        *self.image_path.lock().unwrap() = Some(path.to_string());
    }

    /// Keep observed streams open after their scripted items
    pub(crate) fn hold_streams_open(&self) {
        *self.hold_open.lock().unwrap() = true;
    }

    /// Make the next `delete` block until the returned sender fires
    pub(crate) fn gate_next_delete(&self) -> mpsc::Sender<()> {
        let (release, gate) = mpsc::channel();
        *self.delete_gate.lock().unwrap() = Some(gate);
        release
    }

    pub(crate) fn calls(&self) -> Vec<RepoCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn stored(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    fn record(&self, call: RepoCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().as_deref() {
            Some(msg) => Err(io_failure(msg)),
            None => Ok(()),
        }
    }
}

impl NoteRepository for FakeRepository {
    fn observe_notes(&self) -> NoteStream {
        self.calls.lock().unwrap().push(RepoCall::Observe);

        let emissions = self
            .emissions
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| vec![Emission::Notes(self.stored())]);
        let items = stream::iter(emissions.into_iter().map(|emission| match emission {
            Emission::Notes(notes) => Ok(notes),
            Emission::Fail(msg) => Err(io_failure(&msg)),
        }));

        if *self.hold_open.lock().unwrap() {
            items.chain(stream::pending()).boxed()
        } else {
            items.boxed()
        }
    }

    fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        self.record(RepoCall::Get(id))?;
        Ok(self.stored().into_iter().find(|n| n.id == id))
    }

    fn add_or_update(&self, note: &Note) -> Result<NoteId> {
        self.record(RepoCall::AddOrUpdate(note.clone()))?;

        let mut notes = self.notes.lock().unwrap();
        let mut stored = note.clone();
        if stored.id.is_unset() {
            let next = notes.iter().map(|n| n.id.0).max().unwrap_or(0) + 1;
            stored.id = NoteId(next);
        }
        notes.retain(|n| n.id != stored.id);
        let id = stored.id;
        notes.push(stored);
        Ok(id)
    }

    fn delete(&self, note: &Note) -> Result<()> {
        let gate = self.delete_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.recv();
        }
        self.record(RepoCall::Delete(note.clone()))?;
        self.notes.lock().unwrap().retain(|n| n.id != note.id);
        Ok(())
    }

    fn save_image(&self, source: &Path) -> Result<String> {
        self.record(RepoCall::SaveImage(source.to_path_buf()))?;
        Ok(self
            .image_path
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "/private/images/1.jpg".to_string()))
    }
}

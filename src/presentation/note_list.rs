//! Note list screen

use crate::application::{DeleteNote, ListNotes, UseCases};
use crate::domain::{Note, NoteId, NoteStream};
use crate::presentation::navigation::Route;
use crate::presentation::NOTE_NOT_FOUND;
use crate::presentation::state::{distinct_until_changed, EffectChannel, StateFlow};
use futures::StreamExt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListState {
    pub is_loading: bool,
    pub notes: Vec<Note>,
    pub error: Option<String>,
}

impl Default for NoteListState {
    fn default() -> Self {
        NoteListState {
            is_loading: true,
            notes: Vec::new(),
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListEvent {
    Load,
    Open(NoteId),
    AddNew,
    LongClick(NoteId),
    ConfirmDelete(NoteId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListEffect {
    NavigateToEditor(Option<NoteId>),
    ShowToast(String),
    ShowOptionsDialog(NoteId),
}

impl NoteListEffect {
    /// Destination screen, for effects that navigate
    pub fn route(&self) -> Option<Route> {
        match self {
            NoteListEffect::NavigateToEditor(id) => Some(Route::Editor(*id)),
            _ => None,
        }
    }
}

/// View-model for the note list
///
/// The live subscription runs as a tokio task owned by the view-model and is
/// aborted when the view-model is dropped.
pub struct NoteListViewModel {
    list_notes: ListNotes,
    delete_note: DeleteNote,
    state: Arc<StateFlow<NoteListState>>,
    effects: EffectChannel<NoteListEffect>,
    subscription: Mutex<Option<JoinHandle<()>>>,
}

impl NoteListViewModel {
    /// Create the view-model and start loading; must be called inside a tokio runtime
    pub fn new(use_cases: &UseCases) -> Self {
        let view_model = NoteListViewModel {
            list_notes: use_cases.list_notes.clone(),
            delete_note: use_cases.delete_note.clone(),
            state: Arc::new(StateFlow::new(NoteListState::default())),
            effects: EffectChannel::new(),
            subscription: Mutex::new(None),
        };
        view_model.load();
        view_model
    }

    pub fn state(&self) -> watch::Receiver<NoteListState> {
        self.state.subscribe()
    }

    pub fn current_state(&self) -> NoteListState {
        self.state.value()
    }

    pub fn effects(&self) -> broadcast::Receiver<NoteListEffect> {
        self.effects.subscribe()
    }

    pub async fn on_event(&self, event: NoteListEvent) {
        debug!(?event, "note list event");
        match event {
            NoteListEvent::Load => self.load(),
            NoteListEvent::Open(id) => {
                self.effects.emit(NoteListEffect::NavigateToEditor(Some(id)))
            }
            NoteListEvent::AddNew => self.effects.emit(NoteListEffect::NavigateToEditor(None)),
            NoteListEvent::LongClick(id) => {
                self.effects.emit(NoteListEffect::ShowOptionsDialog(id))
            }
            NoteListEvent::ConfirmDelete(id) => self.delete(id).await,
        }
    }

    /// (Re)subscribe to the live note list, replacing any running subscription
    fn load(&self) {
        self.state.update(|s| NoteListState {
            is_loading: true,
            error: None,
            ..s.clone()
        });

        let task = tokio::spawn(collect_notes(
            self.list_notes.execute(),
            Arc::clone(&self.state),
        ));

        let mut subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = subscription.replace(task) {
            previous.abort();
        }
    }

    async fn delete(&self, id: NoteId) {
        let Some(note) = self.state.value().notes.into_iter().find(|n| n.id == id) else {
            self.toast(NOTE_NOT_FOUND.to_string());
            return;
        };

        match self.delete_note.execute(note).await {
            Ok(()) => {
                self.toast("Note deleted successfully".to_string());
                self.load();
            }
            Err(e) => {
                warn!(%id, error = %e, "delete from list failed");
                self.toast(format!("Failed to delete note: {}", e));
            }
        }
    }

    fn toast(&self, text: String) {
        self.effects.emit(NoteListEffect::ShowToast(text));
    }
}

impl Drop for NoteListViewModel {
    fn drop(&mut self) {
        let subscription = self
            .subscription
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = subscription.take() {
            task.abort();
        }
    }
}

/// Apply each distinct emission to the state; a failure ends the subscription
async fn collect_notes(stream: NoteStream, state: Arc<StateFlow<NoteListState>>) {
    let mut stream = distinct_until_changed(stream);

    while let Some(item) = stream.next().await {
        match item {
            Ok(notes) => {
                state.update(|_| NoteListState {
                    is_loading: false,
                    notes,
                    error: None,
                });
            }
            Err(e) => {
                warn!(error = %e, "note list subscription failed");
                state.update(|s| NoteListState {
                    is_loading: false,
                    error: Some(e.to_string()),
                    ..s.clone()
                });
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{note, Emission, FakeRepository, RepoCall};
    use std::time::Duration;
    use tokio::time::timeout;

    fn view_model(repo: &Arc<FakeRepository>) -> NoteListViewModel {
        NoteListViewModel::new(&UseCases::new(repo.clone()))
    }

    async fn settled(view_model: &NoteListViewModel) -> NoteListState {
        let mut rx = view_model.state();
        let state = timeout(Duration::from_secs(5), rx.wait_for(|s| !s.is_loading))
            .await
            .expect("list never settled")
            .unwrap()
            .clone();
        state
    }

    async fn next_effect(rx: &mut broadcast::Receiver<NoteListEffect>) -> NoteListEffect {
        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("no effect emitted")
            .unwrap()
    }

    #[tokio::test]
    async fn test_initial_load_shows_notes() {
        let notes = vec![note(1, Some("Test"), "Content")];
        let repo = Arc::new(FakeRepository::with_notes(notes.clone()));
        let vm = view_model(&repo);

        let state = settled(&vm).await;

        assert_eq!(state.notes, notes);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_loading_before_first_emission() {
        let repo = Arc::new(FakeRepository::with_emissions(vec![]));
        repo.hold_streams_open();
        let vm = view_model(&repo);

        tokio::task::yield_now().await;

        let state = vm.current_state();
        assert!(state.is_loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_duplicate_emission_is_suppressed() {
        let repo = Arc::new(FakeRepository::with_emissions(vec![
            Emission::Notes(vec![]),
            Emission::Notes(vec![]),
        ]));
        repo.hold_streams_open();
        let vm = view_model(&repo);

        let state = settled(&vm).await;
        tokio::task::yield_now().await;

        assert!(state.notes.is_empty());
        assert_eq!(vm.state.revision(), 1);
    }

    #[tokio::test]
    async fn test_changed_emissions_are_applied() {
        let a = note(1, Some("A"), "");
        let b = note(2, Some("B"), "");
        let repo = Arc::new(FakeRepository::with_emissions(vec![
            Emission::Notes(vec![a.clone()]),
            Emission::Notes(vec![a.clone()]),
            Emission::Notes(vec![a.clone(), b.clone()]),
        ]));
        let vm = view_model(&repo);

        let mut rx = vm.state();
        let state = timeout(Duration::from_secs(5), rx.wait_for(|s| s.notes.len() == 2))
            .await
            .unwrap()
            .unwrap()
            .clone();

        assert_eq!(state.notes, vec![a, b]);
        assert_eq!(vm.state.revision(), 2);
    }

    #[tokio::test]
    async fn test_stream_failure_sets_error_until_next_load() {
        let repo = Arc::new(FakeRepository::with_emissions(vec![
            Emission::Fail("boom".to_string()),
            Emission::Notes(vec![note(1, Some("never shown"), "")]),
        ]));
        let vm = view_model(&repo);

        let state = settled(&vm).await;
        assert!(state.error.as_deref().unwrap().contains("boom"));
        assert!(state.notes.is_empty());

        // Nothing after the failure is applied
        tokio::task::yield_now().await;
        assert!(vm.current_state().notes.is_empty());

        vm.on_event(NoteListEvent::Load).await;
        let reloading = vm.current_state();
        assert!(reloading.is_loading);
        assert_eq!(reloading.error, None);
        assert_eq!(
            repo.calls()
                .iter()
                .filter(|c| **c == RepoCall::Observe)
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_navigation_effects() {
        let repo = Arc::new(FakeRepository::default());
        let vm = view_model(&repo);
        let mut effects = vm.effects();

        vm.on_event(NoteListEvent::Open(NoteId(3))).await;
        vm.on_event(NoteListEvent::AddNew).await;
        vm.on_event(NoteListEvent::LongClick(NoteId(4))).await;

        let open = next_effect(&mut effects).await;
        assert_eq!(open, NoteListEffect::NavigateToEditor(Some(NoteId(3))));
        assert_eq!(open.route(), Some(Route::Editor(Some(NoteId(3)))));

        let add = next_effect(&mut effects).await;
        assert_eq!(add, NoteListEffect::NavigateToEditor(None));
        assert_eq!(add.route(), Some(Route::Editor(None)));

        let options = next_effect(&mut effects).await;
        assert_eq!(options, NoteListEffect::ShowOptionsDialog(NoteId(4)));
        assert_eq!(options.route(), None);
    }

    #[tokio::test]
    async fn test_confirm_delete_unknown_id() {
        let repo = Arc::new(FakeRepository::with_notes(vec![note(1, Some("A"), "")]));
        let vm = view_model(&repo);
        settled(&vm).await;
        let mut effects = vm.effects();

        vm.on_event(NoteListEvent::ConfirmDelete(NoteId(9))).await;

        assert_eq!(
            next_effect(&mut effects).await,
            NoteListEffect::ShowToast("Note not found".to_string())
        );
        assert!(!repo
            .calls()
            .iter()
            .any(|c| matches!(c, RepoCall::Delete(_))));
    }

    #[tokio::test]
    async fn test_confirm_delete_removes_and_reloads() {
        let first = note(1, Some("A"), "");
        let second = note(2, Some("B"), "");
        let repo = Arc::new(FakeRepository::with_notes(vec![first.clone(), second.clone()]));
        let vm = view_model(&repo);
        settled(&vm).await;
        let mut effects = vm.effects();

        vm.on_event(NoteListEvent::ConfirmDelete(NoteId(1))).await;

        assert_eq!(
            next_effect(&mut effects).await,
            NoteListEffect::ShowToast("Note deleted successfully".to_string())
        );
        assert!(repo.calls().contains(&RepoCall::Delete(first)));

        let mut rx = vm.state();
        let state = timeout(
            Duration::from_secs(5),
            rx.wait_for(|s| !s.is_loading && s.notes.len() == 1),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert_eq!(state.notes, vec![second]);
        assert_eq!(
            repo.calls()
                .iter()
                .filter(|c| **c == RepoCall::Observe)
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_confirm_delete_failure() {
        let repo = Arc::new(FakeRepository::with_notes(vec![note(1, Some("A"), "")]));
        let vm = view_model(&repo);
        settled(&vm).await;
        repo.set_failure(Some("locked"));
        let mut effects = vm.effects();

        vm.on_event(NoteListEvent::ConfirmDelete(NoteId(1))).await;

        match next_effect(&mut effects).await {
            NoteListEffect::ShowToast(text) => {
                assert!(text.starts_with("Failed to delete note:"));
                assert!(text.contains("locked"));
            }
            other => panic!("Expected toast, got {:?}", other),
        }
        assert_eq!(vm.current_state().notes.len(), 1);
    }

    #[tokio::test]
    async fn test_reload_with_poisoned_lock_still_aborts_on_drop() {
        let repo = Arc::new(FakeRepository::with_emissions(vec![Emission::Notes(vec![])]));
        repo.hold_streams_open();
        let vm = view_model(&repo);
        settled(&vm).await;

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = vm.subscription.lock().unwrap();
            panic!("poison the subscription lock");
        }));
        assert!(vm.subscription.is_poisoned());

        vm.on_event(NoteListEvent::Load).await;
        let state = Arc::clone(&vm.state);
        drop(vm);

        timeout(Duration::from_secs(5), async {
            while Arc::strong_count(&state) > 1 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("subscription kept running after drop");
    }

    #[tokio::test]
    async fn test_drop_aborts_subscription() {
        let repo = Arc::new(FakeRepository::with_emissions(vec![Emission::Notes(vec![])]));
        repo.hold_streams_open();
        let vm = view_model(&repo);
        settled(&vm).await;

        // The running subscription holds the other reference to the state
        let state = Arc::clone(&vm.state);
        assert_eq!(Arc::strong_count(&state), 3);

        drop(vm);

        timeout(Duration::from_secs(5), async {
            while Arc::strong_count(&state) > 1 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("subscription kept running after drop");
    }
}

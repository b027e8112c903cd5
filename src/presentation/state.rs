//! Screen state and effect primitives
//!
//! `StateFlow` keeps the latest snapshot and hands it to anyone who subscribes,
//! late or not. `EffectChannel` delivers one-shot effects only to receivers that
//! exist when the effect is emitted; nothing is buffered for later subscribers.

use crate::error::Result;
use futures::future;
use futures::stream::{BoxStream, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, watch};
use tracing::trace;

const EFFECT_CAPACITY: usize = 16;

/// Replaying holder for a screen's current state
pub struct StateFlow<S> {
    sender: watch::Sender<S>,
    revision: AtomicU64,
}

impl<S: Clone + PartialEq> StateFlow<S> {
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        StateFlow {
            sender,
            revision: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state
    pub fn value(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Receiver that starts out holding the current state
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    /// Number of changes published so far
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Replace the state with `f(current)`; subscribers are only woken when it differs
    pub fn update(&self, f: impl FnOnce(&S) -> S) -> bool {
        let changed = self.sender.send_if_modified(|state| {
            let next = f(state);
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        });
        if changed {
            self.revision.fetch_add(1, Ordering::SeqCst);
        }
        changed
    }
}

/// Non-replaying channel for one-shot UI effects
pub struct EffectChannel<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone + std::fmt::Debug> EffectChannel<E> {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EFFECT_CAPACITY);
        EffectChannel { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    /// Deliver to current receivers; dropped when nobody is listening
    pub fn emit(&self, effect: E) {
        trace!(?effect, "emitting effect");
        if self.sender.send(effect).is_err() {
            trace!("effect dropped: no receivers");
        }
    }
}

impl<E: Clone + std::fmt::Debug> Default for EffectChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop `Ok` items equal to the previous `Ok` item; errors always pass through
pub fn distinct_until_changed<T>(
    stream: BoxStream<'static, Result<T>>,
) -> BoxStream<'static, Result<T>>
where
    T: Clone + PartialEq + Send + 'static,
{
    let mut last: Option<T> = None;
    stream
        .filter_map(move |item| {
            let keep = match &item {
                Ok(value) if last.as_ref() == Some(value) => false,
                Ok(value) => {
                    last = Some(value.clone());
                    true
                }
                Err(_) => true,
            };
            future::ready(keep.then_some(item))
        })
        .boxed()
}

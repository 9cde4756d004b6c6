//! Listener registry
//!
//! Maps each [`EventKind`] to the callbacks registered for it, in
//! registration order. Each registration gets a [`ListenerId`] drawn from a
//! process-wide counter, so removing one listener never changes the id of
//! another.
//!
//! Dispatch copies the callback list for the kind before calling anything,
//! which lets callbacks register or remove listeners (even themselves)
//! while an event is being delivered.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use super::types::{Event, EventKind};

/// Callback invoked with each matching event
pub type Callback = Arc<dyn Fn(&Event) + Send + Sync>;

/// Stream of events produced by [`ListenerRegistry::channel`]
pub type EventReceiver = ReceiverStream<Event>;

/// Default buffer for channel subscriptions
pub const DEFAULT_CHANNEL_BUFFER: usize = 64;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by [`ListenerRegistry::on`], used to remove the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

type Listeners = HashMap<EventKind, Vec<(ListenerId, Callback)>>;

/// Shared, cloneable registry of event callbacks
///
/// Clones share the same underlying table.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    listeners: Arc<Mutex<Listeners>>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.lock();
        let counts: HashMap<_, _> = listeners
            .iter()
            .map(|(kind, entries)| (*kind, entries.len()))
            .collect();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &counts)
            .finish()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Listeners> {
        // A panicking callback never runs under the lock, so the table
        // itself cannot be left half-updated.
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a callback for `kind`
    ///
    /// # Example
    ///
    /// ```ignore
    /// let id = registry.on(EventKind::Workspace, |event| println!("{:?}", event));
    /// registry.remove(EventKind::Workspace, id);
    /// ```
    pub fn on<F>(&self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = ListenerId::next();
        self.lock()
            .entry(kind)
            .or_default()
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove the listener registered under `id` for `kind`
    ///
    /// Returns `false` if no such listener exists (already removed, or
    /// registered for a different kind).
    pub fn remove(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let Some(entries) = listeners.get_mut(&kind) else {
            return false;
        };

        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        let removed = entries.len() != before;

        if entries.is_empty() {
            listeners.remove(&kind);
        }
        removed
    }

    /// Number of listeners registered for `kind`
    pub fn len(&self, kind: EventKind) -> usize {
        self.lock().get(&kind).map_or(0, Vec::len)
    }

    /// Whether no listener is registered for any kind
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove every listener for every kind
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Invoke every listener for the event's kind, in registration order
    ///
    /// Returns the number of callbacks invoked.
    pub fn dispatch(&self, event: &Event) -> usize {
        let snapshot: Vec<Callback> = match self.lock().get(&event.kind()) {
            Some(entries) => entries.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
            None => return 0,
        };

        for callback in &snapshot {
            callback(event);
        }
        snapshot.len()
    }

    /// Subscribe to `kind` through a bounded channel instead of a callback
    ///
    /// Events that arrive while the buffer is full are dropped. A `buffer`
    /// of zero is treated as one. Dropping the returned stream does not
    /// unregister the listener; pass the id to [`remove`](Self::remove)
    /// for that.
    pub fn channel(&self, kind: EventKind, buffer: usize) -> (ListenerId, EventReceiver) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));

        let id = self.on(kind, move |event| {
            if let Err(e) = sender.try_send(event.clone()) {
                debug!(kind = %event.kind(), error = %e, "Dropping event for channel subscriber");
            }
        });

        (id, ReceiverStream::new(receiver))
    }
}

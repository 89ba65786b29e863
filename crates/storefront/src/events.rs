//! Event root and listener handles
//!
//! Listeners are attached to an explicit [`EventRoot`] rather than to
//! global state. Each registration returns a [`ListenerHandle`]; disposing
//! (or dropping) the handle detaches the listener.

use crate::notify::NotificationKind;
use crate::order_status::OrderStatus;
use crate::quantity::QuantityBounds;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Input events raised by the storefront page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Search field contents changed
    SearchInput { value: String },
    /// Search form submitted
    SearchSubmit,
    /// Quantity field changed
    QuantityInput { raw: String, bounds: QuantityBounds },
    /// Min/max price fields changed
    PriceInput {
        min: Option<String>,
        max: Option<String>,
    },
    /// Seller picked a new status for an order
    StatusChange {
        order: String,
        from: OrderStatus,
        to: OrderStatus,
    },
    /// Something wants to tell the user about it
    Notify {
        kind: NotificationKind,
        message: String,
    },
}

/// Discriminant used to route events to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SearchInput,
    SearchSubmit,
    QuantityInput,
    PriceInput,
    StatusChange,
    Notify,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::SearchInput { .. } => EventKind::SearchInput,
            UiEvent::SearchSubmit => EventKind::SearchSubmit,
            UiEvent::QuantityInput { .. } => EventKind::QuantityInput,
            UiEvent::PriceInput { .. } => EventKind::PriceInput,
            UiEvent::StatusChange { .. } => EventKind::StatusChange,
            UiEvent::Notify { .. } => EventKind::Notify,
        }
    }
}

type Listener = Arc<dyn Fn(&UiEvent) + Send + Sync + 'static>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, EventKind, Listener)>,
}

/// Container that listeners are attached to
#[derive(Clone, Default)]
pub struct EventRoot {
    registry: Arc<Mutex<Registry>>,
}

impl EventRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` for events of `kind`
    pub fn on<F>(&self, kind: EventKind, handler: F) -> ListenerHandle
    where
        F: Fn(&UiEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, kind, Arc::new(handler)));
        trace!(id, ?kind, "Attached listener");

        ListenerHandle {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every listener for its kind
    ///
    /// Returns how many listeners ran. Listeners run outside the registry
    /// lock, so they may attach or detach listeners themselves.
    pub fn dispatch(&self, event: &UiEvent) -> usize {
        let kind = event.kind();
        let matching: Vec<Listener> = self
            .registry
            .lock()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, listener)| listener.clone())
            .collect();

        for listener in &matching {
            listener(event);
        }
        matching.len()
    }

    pub fn listener_count(&self) -> usize {
        self.registry.lock().listeners.len()
    }
}

/// Keeps a listener attached; detaches it on dispose or drop
#[must_use = "dropping a ListenerHandle detaches the listener"]
pub struct ListenerHandle {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl ListenerHandle {
    /// Detach the listener now
    pub fn dispose(self) {}

    /// Whether the listener is still registered on a live root
    pub fn is_attached(&self) -> bool {
        self.registry
            .upgrade()
            .map_or(false, |r| r.lock().listeners.iter().any(|(id, _, _)| *id == self.id))
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = {
            let mut registry = registry.lock();
            registry
                .listeners
                .iter()
                .position(|(id, _, _)| *id == self.id)
                .map(|index| registry.listeners.remove(index))
        };
        // The closure may own other handles on this root; drop it unlocked
        drop(removed);
        trace!(id = self.id, "Detached listener");
    }
}

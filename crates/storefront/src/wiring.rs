//! Storefront wiring
//!
//! [`init`] attaches every behaviour to an [`EventRoot`] and returns the
//! handles needed to take it all down again. Behaviour results are published
//! as [`UiEffect`]s for the page to render.

use crate::config::StorefrontConfig;
use crate::confirm::{confirmation, ConfirmationRequest, Decision};
use crate::events::{EventKind, EventRoot, ListenerHandle, UiEvent};
use crate::notify::{Notification, NotificationKind, Notifier};
use crate::order_status::OrderStatus;
use crate::price::{PlainFormatter, PriceRange};
use crate::search::SearchBox;
use crate::Result;
use debounce::DebounceError;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Something the page should render in response to an event
#[derive(Debug)]
pub enum UiEffect {
    /// Run a product search for this query
    SearchQuery(String),
    /// Replace the quantity field's contents
    QuantityCorrected { value: u32 },
    /// New text for the price-range label
    PriceLabel(String),
    /// Ask the seller to confirm a status change
    ConfirmStatusChange {
        order: String,
        request: ConfirmationRequest,
    },
    /// Status change confirmed; submit it
    StatusApplied { order: String, status: OrderStatus },
    /// Status change refused or declined; reset the selection to `status`
    StatusReverted { order: String, status: OrderStatus },
    /// A notification was shown
    Notified(Notification),
}

/// Live storefront behaviours attached to a root
pub struct Wiring {
    listeners: Vec<ListenerHandle>,
    search: Arc<SearchBox>,
    notifier: Arc<Notifier>,
    confirmations: Arc<Confirmations>,
}

type Effects = mpsc::UnboundedSender<UiEffect>;

/// Tasks waiting on a confirmation decision
///
/// Once closed, newly tracked tasks are aborted straight away.
#[derive(Default)]
struct Confirmations {
    state: Mutex<ConfirmationTasks>,
}

#[derive(Default)]
struct ConfirmationTasks {
    tasks: Vec<JoinHandle<()>>,
    closed: bool,
}

impl Confirmations {
    fn track(&self, task: JoinHandle<()>) {
        let mut state = self.state.lock();
        if state.closed {
            task.abort();
            return;
        }
        state.tasks.retain(|t| !t.is_finished());
        state.tasks.push(task);
    }

    /// Abort every waiting task; returns how many were still running
    fn close(&self) -> usize {
        let tasks = {
            let mut state = self.state.lock();
            state.closed = true;
            std::mem::take(&mut state.tasks)
        };
        let mut aborted = 0;
        for task in tasks.into_iter().filter(|t| !t.is_finished()) {
            task.abort();
            aborted += 1;
        }
        aborted
    }

    fn pending(&self) -> usize {
        self.state
            .lock()
            .tasks
            .iter()
            .filter(|t| !t.is_finished())
            .count()
    }
}

/// Attach the storefront behaviours to `root`
///
/// Must be called from inside a tokio runtime; fails fast otherwise.
pub fn init(
    root: &EventRoot,
    config: &StorefrontConfig,
) -> Result<(Wiring, mpsc::UnboundedReceiver<UiEffect>)> {
    config.validate()?;
    let runtime = Handle::try_current().map_err(|_| DebounceError::NoRuntime)?;
    let (effects, effects_rx) = mpsc::unbounded_channel();

    let search = {
        let effects = effects.clone();
        Arc::new(SearchBox::new(&config.search, move |query| {
            let _ = effects.send(UiEffect::SearchQuery(query));
        })?)
    };
    let notifier = Arc::new(Notifier::new(&config.notifications)?);
    let formatter = PlainFormatter::new(config.price.currency.clone());
    let confirmations = Arc::new(Confirmations::default());

    let mut listeners = Vec::new();

    listeners.push({
        let search = search.clone();
        root.on(EventKind::SearchInput, move |event| {
            if let UiEvent::SearchInput { value } = event {
                search.input(value);
            }
        })
    });

    listeners.push({
        let search = search.clone();
        root.on(EventKind::SearchSubmit, move |_| {
            search.submit();
        })
    });

    listeners.push({
        let effects = effects.clone();
        root.on(EventKind::QuantityInput, move |event| {
            if let UiEvent::QuantityInput { raw, bounds } = event {
                if let Some(value) = bounds.correction(raw) {
                    let _ = effects.send(UiEffect::QuantityCorrected { value });
                }
            }
        })
    });

    listeners.push({
        let effects = effects.clone();
        root.on(EventKind::PriceInput, move |event| {
            if let UiEvent::PriceInput { min, max } = event {
                let range = PriceRange::from_inputs(min.as_deref(), max.as_deref());
                let _ = effects.send(UiEffect::PriceLabel(range.label(&formatter)));
            }
        })
    });

    listeners.push({
        let effects = effects.clone();
        let notifier = notifier.clone();
        let confirmations = confirmations.clone();
        root.on(EventKind::StatusChange, move |event| {
            if let UiEvent::StatusChange { order, from, to } = event {
                request_status_change(
                    &runtime,
                    &effects,
                    &notifier,
                    &confirmations,
                    order,
                    *from,
                    *to,
                );
            }
        })
    });

    listeners.push({
        let effects = effects.clone();
        let notifier = notifier.clone();
        root.on(EventKind::Notify, move |event| {
            if let UiEvent::Notify { kind, message } = event {
                let shown = notifier.show(*kind, message.clone());
                let _ = effects.send(UiEffect::Notified(shown));
            }
        })
    });

    info!(listeners = listeners.len(), "Storefront behaviours attached");

    Ok((
        Wiring {
            listeners,
            search,
            notifier,
            confirmations,
        },
        effects_rx,
    ))
}

fn request_status_change(
    runtime: &Handle,
    effects: &Effects,
    notifier: &Notifier,
    confirmations: &Confirmations,
    order: &str,
    from: OrderStatus,
    to: OrderStatus,
) {
    if from == to {
        return;
    }

    if !from.can_transition_to(to) {
        debug!(order, %from, %to, "Refusing status change");
        let shown = notifier.show(
            NotificationKind::Warning,
            format!(
                "Order {} cannot go from {} to {}",
                order,
                from.label(),
                to.label()
            ),
        );
        let _ = effects.send(UiEffect::Notified(shown));
        let _ = effects.send(UiEffect::StatusReverted {
            order: order.to_string(),
            status: from,
        });
        return;
    }

    let (request, decision) = confirmation(OrderStatus::confirmation_prompt(order, from, to));
    let _ = effects.send(UiEffect::ConfirmStatusChange {
        order: order.to_string(),
        request,
    });

    let effects = effects.clone();
    let order = order.to_string();
    let task = runtime.spawn(async move {
        let effect = match decision.await {
            Decision::Affirmed => UiEffect::StatusApplied { order, status: to },
            // Only the selection is reset; submit-button state is left alone
            Decision::Declined => UiEffect::StatusReverted { order, status: from },
        };
        let _ = effects.send(effect);
    });
    confirmations.track(task);
}

impl Wiring {
    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Status changes still waiting for the seller's answer
    pub fn pending_confirmations(&self) -> usize {
        self.confirmations.pending()
    }

    /// Detach every listener and drop pending work
    ///
    /// Answers to confirmations still outstanding are ignored afterwards.
    pub fn dispose(self) {}

    fn teardown(&mut self) {
        let detached = self.listeners.len();
        self.listeners.clear();
        self.search.cancel();
        self.notifier.clear();
        let aborted = self.confirmations.close();
        info!(detached, aborted, "Storefront behaviours detached");
    }
}

impl Drop for Wiring {
    fn drop(&mut self) {
        self.teardown();
    }
}

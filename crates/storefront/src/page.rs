//! A loaded page: document, listeners, and the services handlers use.
//!
//! `Page` is cheaply cloneable via `Arc`; spawned request and timer tasks
//! hold their own clone. The document mutex is only ever held for short
//! synchronous sections, never across an `.await`.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::api::StorefrontApi;
use crate::config::InteractionConfig;
use crate::dom::{Document, ElementId};
use crate::host::Host;

/// Kind of a user-initiated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Submit,
}

/// Handler attached to an element by [`Page::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Action {
    AddToCart,
    UpdateCartQuantity,
    ValidateForm,
    GuardSearch,
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    target: ElementId,
    kind: EventKind,
    action: Action,
}

/// Event state handlers may modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Event {
    pub(crate) target: ElementId,
    pub(crate) default_prevented: bool,
    pub(crate) propagation_stopped: bool,
}

impl Event {
    const fn new(target: ElementId) -> Self {
        Self {
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub(crate) const fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub(crate) const fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// What happened when an event was dispatched.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    /// A handler suppressed the default action (navigation, submission).
    pub default_prevented: bool,
    /// A handler stopped the event from reaching outer listeners.
    pub propagation_stopped: bool,
    /// Number of listeners that ran.
    pub handled: usize,
    /// Background requests started by the handlers.
    pub tasks: Vec<JoinHandle<()>>,
}

impl DispatchOutcome {
    /// Whether the browser would go on to perform the default action.
    #[must_use]
    pub const fn proceeds(&self) -> bool {
        !self.default_prevented
    }

    /// Wait for every request started by this dispatch to finish handling
    /// its reply. Timers those requests schedule keep running.
    pub async fn settle(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::warn!("Event task failed: {e}");
            }
        }
    }
}

/// A loaded page.
pub struct Page<A, H> {
    inner: Arc<PageInner<A, H>>,
}

struct PageInner<A, H> {
    config: InteractionConfig,
    api: A,
    host: H,
    document: Mutex<Document>,
    listeners: Mutex<Vec<Listener>>,
    initialized: AtomicBool,
}

impl<A, H> Clone for Page<A, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, H> Page<A, H>
where
    A: Send + Sync + 'static,
    H: Host,
{
    /// Load a page. No listeners are attached until [`Page::init`] runs.
    #[must_use]
    pub fn new(config: InteractionConfig, api: A, host: H, document: Document) -> Self {
        Self {
            inner: Arc::new(PageInner {
                config,
                api,
                host,
                document: Mutex::new(document),
                listeners: Mutex::new(Vec::new()),
                initialized: AtomicBool::new(false),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &InteractionConfig {
        &self.inner.config
    }

    /// Get a reference to the API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Get a reference to the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.inner.host
    }

    /// Read the document.
    pub fn with_document<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&lock(&self.inner.document))
    }

    /// Mutate the document (user input, server-rendered inserts, ...).
    pub fn with_document_mut<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut lock(&self.inner.document))
    }

    /// Reload the page after `delay`. Never cancelled.
    pub(crate) fn schedule_reload(&self, delay: std::time::Duration) -> JoinHandle<()> {
        let page = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!("Reloading page");
            page.host().reload();
        })
    }

    pub(crate) fn initialized(&self) -> &AtomicBool {
        &self.inner.initialized
    }

    pub(crate) fn add_listener(&self, target: ElementId, kind: EventKind, action: Action) {
        lock(&self.inner.listeners).push(Listener {
            target,
            kind,
            action,
        });
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.inner.listeners).len()
    }
}

impl<A, H> Page<A, H>
where
    A: StorefrontApi,
    H: Host,
{
    /// Dispatch a user event to the listeners attached to `target`.
    ///
    /// Returns immediately; requests started by handlers run in the
    /// background and are reported in [`DispatchOutcome::tasks`].
    ///
    /// # Panics
    ///
    /// Panics if a handler starts a request outside a Tokio runtime.
    pub fn dispatch(&self, target: ElementId, kind: EventKind) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        if !self.with_document(|doc| doc.contains(target)) {
            return outcome;
        }

        let actions: Vec<Action> = lock(&self.inner.listeners)
            .iter()
            .filter(|listener| listener.target == target && listener.kind == kind)
            .map(|listener| listener.action)
            .collect();

        let mut event = Event::new(target);
        for action in actions {
            outcome.handled += 1;
            let task = match action {
                Action::AddToCart => self.on_add_to_cart_click(&mut event),
                Action::UpdateCartQuantity => self.on_cart_quantity_change(&event),
                Action::ValidateForm => {
                    self.on_validated_form_submit(&mut event);
                    None
                }
                Action::GuardSearch => {
                    self.on_search_submit(&mut event);
                    None
                }
            };
            outcome.tasks.extend(task);
        }

        outcome.default_prevented = event.default_prevented;
        outcome.propagation_stopped = event.propagation_stopped;
        outcome
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

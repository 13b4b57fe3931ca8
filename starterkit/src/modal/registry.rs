//! Name-addressed modal registry.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{broadcast, oneshot};

use super::event::{ModalEvent, ModalEventKind};
use super::options::{ModalOptions, merge_over, merge_under};
use super::reply::{CloseValue, ModalReply, Resolver};

/// Default capacity of the change notification channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// State for one modal name.
struct ModalEntry {
    open: bool,
    options: ModalOptions,
    /// False for placeholders created by `open()` before the component mounted.
    registered: bool,
    /// Bumped on every `open()`. Lets a deferred open detect that the
    /// entry was closed or re-opened in the meantime.
    generation: u64,
    /// The single caller waiting for this modal to close.
    resolver: Option<Resolver>,
}

impl ModalEntry {
    fn registered(options: ModalOptions) -> Self {
        Self {
            open: false,
            options,
            registered: true,
            generation: 0,
            resolver: None,
        }
    }

    fn placeholder() -> Self {
        Self {
            registered: false,
            ..Self::registered(ModalOptions::new())
        }
    }
}

/// Registry of named modals.
///
/// Cheap to clone; clones share the same entries. Construct one per
/// application and hand it to whatever needs it.
///
/// Unknown names never fail: they read as closed with no options, and
/// closing or unregistering them does nothing.
#[derive(Clone)]
pub struct ModalRegistry {
    entries: Arc<Mutex<HashMap<String, ModalEntry>>>,
    events: broadcast::Sender<ModalEvent>,
}

impl ModalRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create an empty registry whose change channel buffers `capacity` events.
    pub fn with_event_capacity(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            events,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, ModalEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, name: &str, kind: ModalEventKind) {
        // No subscribers is fine.
        let _ = self.events.send(ModalEvent::new(name, kind));
    }

    /// Subscribe to modal changes.
    ///
    /// Events say that something changed, not the resulting state. A close
    /// or re-open can land between an event being sent and received, so
    /// observers should re-read [`is_open`](Self::is_open) and
    /// [`options`](Self::options) on every event rather than trust the
    /// event kind alone. A lagging receiver can skip events the same way.
    pub fn subscribe(&self) -> broadcast::Receiver<ModalEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Component side
    // =========================================================================

    /// Register a modal. Called from the modal component's mount hook.
    ///
    /// If `open()` already ran for this name, the caller's options are kept
    /// and `defaults` only fill in missing keys. The open state is then
    /// re-asserted on the next scheduler tick, so observers that subscribe
    /// while the component mounts still see it open.
    ///
    /// Registering a name that is already registered is ignored.
    pub fn register(&self, name: &str, defaults: ModalOptions) {
        let deferred = {
            let mut entries = self.entries();
            match entries.get_mut(name) {
                None => {
                    entries.insert(name.to_string(), ModalEntry::registered(defaults));
                    None
                }
                Some(entry) if !entry.registered => {
                    merge_under(&mut entry.options, defaults);
                    entry.registered = true;
                    entry.resolver.is_some().then_some(entry.generation)
                }
                Some(_) => {
                    log::debug!("modal '{name}' is already registered, keeping its state");
                    return;
                }
            }
        };

        self.emit(name, ModalEventKind::Registered);

        if let Some(generation) = deferred {
            self.defer_open(name, generation);
        }
    }

    /// Remove a modal. Called from the modal component's unmount hook.
    ///
    /// A caller still waiting on this modal is abandoned: its reply never
    /// resolves.
    pub fn unregister(&self, name: &str) {
        let Some(entry) = self.entries().remove(name) else {
            return;
        };

        if entry.resolver.is_some() {
            log::warn!("modal '{name}' unregistered while open; its pending caller will never resolve");
        }
        drop(entry);

        self.emit(name, ModalEventKind::Unregistered);
    }

    fn defer_open(&self, name: &str, generation: u64) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let registry = self.clone();
                let name = name.to_string();
                handle.spawn(async move {
                    tokio::task::yield_now().await;
                    registry.settle_open(&name, generation);
                });
            }
            Err(_) => self.settle_open(name, generation),
        }
    }

    fn settle_open(&self, name: &str, generation: u64) {
        let settled = {
            let mut entries = self.entries();
            match entries.get_mut(name) {
                Some(entry) if entry.generation == generation && entry.resolver.is_some() => {
                    entry.open = true;
                    true
                }
                _ => false,
            }
        };

        if settled {
            self.emit(name, ModalEventKind::Opened);
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Whether the modal should currently render open.
    pub fn is_open(&self, name: &str) -> bool {
        self.entries().get(name).is_some_and(|entry| entry.open)
    }

    /// Options for the modal, empty for unknown names.
    pub fn options(&self, name: &str) -> ModalOptions {
        self.entries()
            .get(name)
            .map(|entry| entry.options.clone())
            .unwrap_or_default()
    }

    /// Whether a component has registered this name.
    pub fn is_registered(&self, name: &str) -> bool {
        self.entries().get(name).is_some_and(|entry| entry.registered)
    }

    /// Whether a caller is waiting for this modal to close.
    pub fn is_pending(&self, name: &str) -> bool {
        self.entries()
            .get(name)
            .is_some_and(|entry| entry.resolver.as_ref().is_some_and(|tx| !tx.is_closed()))
    }

    /// Names of all open modals, sorted.
    pub fn open_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries()
            .iter()
            .filter(|(_, entry)| entry.open)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Number of entries, placeholders included.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    // =========================================================================
    // Caller side
    // =========================================================================

    /// Open a modal and get a future for the value it is closed with.
    ///
    /// `options` are merged over the modal's current options. The modal is
    /// marked open immediately, even if no component has registered it yet.
    ///
    /// Only one caller can wait per name. Opening a modal that already has
    /// a waiting caller replaces that caller, whose reply then never
    /// resolves.
    pub fn open<T: Any + Send>(&self, name: &str, options: ModalOptions) -> ModalReply<T> {
        let (tx, rx) = oneshot::channel();

        let superseded = {
            let mut entries = self.entries();
            let entry = entries.entry(name.to_string()).or_insert_with(|| {
                log::warn!("modal '{name}' is not registered yet; make sure its component mounts");
                ModalEntry::placeholder()
            });
            merge_over(&mut entry.options, options);
            entry.open = true;
            entry.generation += 1;
            entry.resolver.replace(tx)
        };

        if superseded.is_some_and(|previous| !previous.is_closed()) {
            log::warn!("modal '{name}' opened again before closing; the previous caller is abandoned");
        }

        self.emit(name, ModalEventKind::Opened);
        ModalReply::new(name, rx)
    }

    /// Close a modal, resolving its waiting caller with `value`.
    ///
    /// The entry always ends up closed with empty options, whether or not
    /// anyone was waiting. Options are not kept across a close.
    pub fn close<T: Any + Send>(&self, name: &str, value: Option<T>) {
        self.resolve(name, value.map(|value| Box::new(value) as Box<dyn Any + Send>));
    }

    /// Close a modal without a value. The waiting caller receives `None`.
    pub fn dismiss(&self, name: &str) {
        self.resolve(name, None);
    }

    /// Dismiss every open modal.
    pub fn close_all(&self) {
        let open = self.open_names();
        for name in &open {
            self.resolve(name, None);
        }

        if !open.is_empty() {
            log::debug!("closed {} modal(s)", open.len());
        }
    }

    fn resolve(&self, name: &str, value: CloseValue) {
        let resolver = {
            let mut entries = self.entries();
            let Some(entry) = entries.get_mut(name) else {
                return;
            };
            entry.open = false;
            entry.options.clear();
            entry.resolver.take()
        };

        if let Some(resolver) = resolver {
            // The caller may have dropped its reply.
            let _ = resolver.send(value);
        }

        self.emit(name, ModalEventKind::Closed);
    }
}

impl Default for ModalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ModalRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalRegistry")
            .field("entries", &self.len())
            .field("open", &self.open_names())
            .finish()
    }
}

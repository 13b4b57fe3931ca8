//! Modal change notifications.

/// What happened to a modal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEventKind {
    /// A component registered the modal.
    Registered,
    /// The modal became (or was re-asserted as) open.
    Opened,
    /// The modal was closed.
    Closed,
    /// The modal's entry was removed.
    Unregistered,
}

/// A change to one named modal, delivered to registry subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalEvent {
    /// Name of the modal that changed.
    pub name: String,
    /// The kind of change.
    pub kind: ModalEventKind,
}

impl ModalEvent {
    pub(crate) fn new(name: &str, kind: ModalEventKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

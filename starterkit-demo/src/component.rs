//! A headless confirm modal component.

use starterkit::modal::{ModalOptions, ModalRegistry};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Mount a component for `name` that answers `answer` as soon as it is
/// shown, then unmounts.
pub fn mount(modals: ModalRegistry, name: &'static str, answer: bool) -> JoinHandle<()> {
    let mut events = modals.subscribe();
    modals.register(name, ModalOptions::new());

    tokio::spawn(async move {
        loop {
            if modals.is_open(name) {
                let options = modals.options(name);
                log::info!(
                    "showing '{}': {}",
                    name,
                    options.get("message").and_then(|m| m.as_str()).unwrap_or_default()
                );
                modals.close(name, Some(answer));
                break;
            }

            if let Err(RecvError::Closed) = events.recv().await {
                break;
            }
        }
        modals.unregister(name);
    })
}

//! Named modal orchestration.
//!
//! Modal components register themselves by name when they mount and
//! unregister when they unmount. Any other code can open a modal by name
//! and await the value it is closed with.
//!
//! # Example
//!
//! ```ignore
//! use starterkit::modal::{ConfirmOptions, ModalRegistry};
//!
//! let modals = ModalRegistry::new();
//!
//! // In the confirm modal's mount hook
//! modals.register("confirm", Default::default());
//!
//! // Anywhere else
//! let confirmed = modals
//!     .open::<bool>("confirm", ConfirmOptions::new("This cannot be undone.").into())
//!     .await;
//!
//! // In the confirm modal's button handler
//! modals.close("confirm", Some(true));
//! ```

mod event;
mod options;
mod registry;
mod reply;
mod unsaved;

pub use event::*;
pub use options::*;
pub use registry::*;
pub use reply::*;
pub use unsaved::*;

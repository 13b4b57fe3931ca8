//! Client-side state for SaaS starter applications
//!
//! Named modals that can be opened and awaited from anywhere, a toast
//! queue, the signed-in session, route guards and locale catalogs.

pub mod auth;
pub mod error;
pub mod guard;
pub mod i18n;
pub mod modal;
pub mod toast;

mod config;
mod starter;

pub use config::*;
pub use starter::*;

pub mod prelude {
    pub use crate::auth::{MemoryStorage, SessionStore, TokenRefresher, TokenStorage, UserInfo, UserToken};
    pub use crate::error::{AuthError, StorageError};
    pub use crate::guard::{GuardOutcome, RouteAuth};
    pub use crate::i18n::{LocaleCatalog, LocaleInfo};
    pub use crate::modal::{ConfirmColor, ConfirmOptions, ModalEvent, ModalEventKind, ModalOptions, ModalRegistry, ModalReply, UnsavedChangesGuard};
    pub use crate::toast::{Toast, ToastLevel, ToastQueue};
    pub use crate::{Starter, StarterConfig};
}

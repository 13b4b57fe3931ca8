//! The application's store bundle.

use std::sync::Arc;

use crate::auth::{SessionStore, TokenStorage};
use crate::config::StarterConfig;
use crate::guard::{self, GuardOutcome, RouteAuth};
use crate::i18n::LocaleCatalog;
use crate::modal::ModalRegistry;
use crate::toast::ToastQueue;

/// Every client-side store, built once at startup from one config.
///
/// Pass this (or the individual stores, which are cheap to clone) to the
/// code that needs it.
#[derive(Debug, Clone)]
pub struct Starter {
    config: StarterConfig,
    pub modals: ModalRegistry,
    pub toasts: ToastQueue,
    pub session: SessionStore,
    pub locales: LocaleCatalog,
}

impl Starter {
    /// Build the stores and restore any persisted session.
    pub fn new(config: StarterConfig, storage: Arc<dyn TokenStorage>) -> Self {
        let session = SessionStore::new(storage, config.token_storage_key.clone());
        session.load();

        Self {
            modals: ModalRegistry::with_event_capacity(config.modal_event_capacity),
            toasts: ToastQueue::with_capacity(config.toast_capacity),
            locales: LocaleCatalog::new(
                config.default_locale.clone(),
                config.fallback_locale.clone(),
            ),
            session,
            config,
        }
    }

    pub fn config(&self) -> &StarterConfig {
        &self.config
    }

    /// Run the auth guard with the configured login path.
    pub fn guard_route(&self, auth: RouteAuth, full_path: &str) -> GuardOutcome {
        guard::auth_guard(auth, &self.session, &self.config.login_path, full_path)
    }

    /// Run the admin guard with the configured home path.
    pub fn guard_admin(&self) -> GuardOutcome {
        guard::admin_guard(&self.session, &self.config.home_path)
    }
}

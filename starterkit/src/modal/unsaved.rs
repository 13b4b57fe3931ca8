//! Leave-page confirmation for forms with unsaved changes.

use super::{ConfirmColor, ConfirmOptions, ModalRegistry};

/// Name of the modal the guard opens.
pub const CONFIRM_MODAL: &str = "confirm";

/// Asks for confirmation through the `"confirm"` modal before leaving a
/// page while `is_dirty` reports unsaved changes.
pub struct UnsavedChangesGuard<F> {
    modals: ModalRegistry,
    is_dirty: F,
    options: ConfirmOptions,
}

impl<F: Fn() -> bool> UnsavedChangesGuard<F> {
    pub fn new(modals: ModalRegistry, is_dirty: F) -> Self {
        Self {
            modals,
            is_dirty,
            options: Self::default_options(),
        }
    }

    fn default_options() -> ConfirmOptions {
        ConfirmOptions::new("You have unsaved changes. Are you sure you want to leave this page?")
            .title("Unsaved changes")
            .buttons("Leave", "Stay")
            .color(ConfirmColor::Error)
    }

    /// Replace any of the default texts. Unset fields keep their default.
    pub fn with_options(mut self, overrides: ConfirmOptions) -> Self {
        let defaults = self.options;
        self.options = ConfirmOptions {
            title: overrides.title.or(defaults.title),
            message: overrides.message.or(defaults.message),
            confirm_text: overrides.confirm_text.or(defaults.confirm_text),
            cancel_text: overrides.cancel_text.or(defaults.cancel_text),
            confirm_color: overrides.confirm_color.or(defaults.confirm_color),
            z_index: overrides.z_index.or(defaults.z_index),
            classes: overrides.classes.or(defaults.classes),
        };
        self
    }

    pub fn options(&self) -> &ConfirmOptions {
        &self.options
    }

    pub fn is_dirty(&self) -> bool {
        (self.is_dirty)()
    }

    /// Whether it is safe to leave.
    ///
    /// Returns `true` straight away when nothing is dirty. Otherwise opens
    /// the confirm modal and returns its answer; a dismissal counts as
    /// staying. Like any modal reply, this never returns if the modal is
    /// unregistered or re-opened before it closes.
    pub async fn check_before_leave(&self) -> bool {
        if !self.is_dirty() {
            return true;
        }

        log::debug!("asking before leaving a page with unsaved changes");
        self.modals
            .open::<bool>(CONFIRM_MODAL, self.options.clone().into())
            .await
            .unwrap_or(false)
    }

    /// Message for a host's unload prompt, if there are unsaved changes.
    pub fn before_unload_message(&self) -> Option<&str> {
        if self.is_dirty() {
            self.options.message.as_deref()
        } else {
            None
        }
    }
}

impl<F> std::fmt::Debug for UnsavedChangesGuard<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsavedChangesGuard")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::modal::ModalOptions;

    async fn wait_until_pending(modals: &ModalRegistry) {
        while !modals.is_pending(CONFIRM_MODAL) {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_clean_page_leaves_without_asking() {
        let modals = ModalRegistry::new();
        let guard = UnsavedChangesGuard::new(modals.clone(), || false);

        assert!(guard.check_before_leave().await);
        assert!(!modals.is_open(CONFIRM_MODAL));
        assert!(modals.is_empty());
        assert_eq!(guard.before_unload_message(), None);
    }

    #[tokio::test]
    async fn test_dirty_page_leaves_when_confirmed() {
        let modals = ModalRegistry::new();
        modals.register(CONFIRM_MODAL, ModalOptions::new());
        let guard = UnsavedChangesGuard::new(modals.clone(), || true);

        let (leave, ()) = tokio::join!(guard.check_before_leave(), async {
            wait_until_pending(&modals).await;
            let options = modals.options(CONFIRM_MODAL);
            assert_eq!(options["confirmText"], "Leave");
            assert_eq!(options["confirmColor"], "error");
            modals.close(CONFIRM_MODAL, Some(true));
        });

        assert!(leave);
        assert!(!modals.is_open(CONFIRM_MODAL));
    }

    #[tokio::test]
    async fn test_dirty_page_stays_when_dismissed() {
        let modals = ModalRegistry::new();
        modals.register(CONFIRM_MODAL, ModalOptions::new());
        let dirty = Arc::new(AtomicBool::new(true));
        let flag = dirty.clone();
        let guard = UnsavedChangesGuard::new(modals.clone(), move || flag.load(Ordering::SeqCst));

        let (leave, ()) = tokio::join!(guard.check_before_leave(), async {
            wait_until_pending(&modals).await;
            modals.dismiss(CONFIRM_MODAL);
        });
        assert!(!leave);

        dirty.store(false, Ordering::SeqCst);
        assert!(guard.check_before_leave().await);
    }

    #[test]
    fn test_overrides_keep_unset_defaults() {
        let guard = UnsavedChangesGuard::new(ModalRegistry::new(), || true)
            .with_options(ConfirmOptions::new("Your changes will be lost.").title("Discard changes?"));

        let options = guard.options();
        assert_eq!(options.title.as_deref(), Some("Discard changes?"));
        assert_eq!(options.cancel_text.as_deref(), Some("Stay"));
        assert_eq!(options.confirm_color, Some(ConfirmColor::Error));
        assert_eq!(guard.before_unload_message(), Some("Your changes will be lost."));
    }
}

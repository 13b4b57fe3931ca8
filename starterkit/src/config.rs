//! Starter configuration

use crate::modal::DEFAULT_EVENT_CAPACITY;
use crate::toast::DEFAULT_TOAST_CAPACITY;

/// Configuration shared by the client-side stores.
///
/// # Example
///
/// ```
/// use starterkit::StarterConfig;
///
/// let config = StarterConfig::default()
///     .with_default_locale("en")
///     .with_toast_capacity(8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarterConfig {
    /// Storage key the session token is persisted under.
    ///
    /// Default: `"user-token"`
    pub token_storage_key: String,

    /// Where the auth guard sends logged-out users.
    ///
    /// Default: `"/login"`
    pub login_path: String,

    /// Where the admin guard sends non-admin users.
    ///
    /// Default: `"/"`
    pub home_path: String,

    /// Locale selected at startup.
    ///
    /// Default: `"fr"`
    pub default_locale: String,

    /// Locale consulted when a key is missing from the current one.
    ///
    /// Default: `"fr"`
    pub fallback_locale: String,

    /// Maximum number of queued toasts.
    ///
    /// Default: 32
    pub toast_capacity: usize,

    /// Buffered modal change events per subscriber.
    ///
    /// Default: 64
    pub modal_event_capacity: usize,
}

impl Default for StarterConfig {
    fn default() -> Self {
        Self {
            token_storage_key: "user-token".into(),
            login_path: "/login".into(),
            home_path: "/".into(),
            default_locale: "fr".into(),
            fallback_locale: "fr".into(),
            toast_capacity: DEFAULT_TOAST_CAPACITY,
            modal_event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl StarterConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_storage_key(mut self, key: impl Into<String>) -> Self {
        self.token_storage_key = key.into();
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = path.into();
        self
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = locale.into();
        self
    }

    pub fn with_toast_capacity(mut self, capacity: usize) -> Self {
        self.toast_capacity = capacity;
        self
    }

    pub fn with_modal_event_capacity(mut self, capacity: usize) -> Self {
        self.modal_event_capacity = capacity;
        self
    }
}

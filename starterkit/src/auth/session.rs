//! Session store and token refresh

use std::sync::{Arc, RwLock, RwLockReadGuard};

use async_trait::async_trait;

use super::storage::TokenStorage;
use super::token::{UserInfo, UserToken};
use crate::error::AuthError;

/// Exchanges a still-valid token for a fresh one.
///
/// Implementations talk to the backend; the session store only decides
/// what to do with the outcome.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Returns a fresh token for the session `token` belongs to.
    async fn refresh(&self, token: &UserToken) -> Result<UserToken, AuthError>;
}

#[derive(Default)]
struct SessionState {
    token: Option<UserToken>,
    /// The token belongs to a user an admin is acting as.
    impersonating: bool,
}

/// The signed-in user's session.
///
/// Cheap to clone; clones share the same session. The token is stored
/// under `key`; the impersonation flag under `key` with an
/// `-impersonating` suffix.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    storage: Arc<dyn TokenStorage>,
    key: String,
}

impl SessionStore {
    /// Creates a logged-out session persisted under `key` in `storage`.
    pub fn new(storage: Arc<dyn TokenStorage>, key: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            storage,
            key: key.into(),
        }
    }

    fn impersonation_key(&self) -> String {
        format!("{}-impersonating", self.key)
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, token: Option<UserToken>, impersonating: bool) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.token = token;
        state.impersonating = impersonating;
    }

    /// Restore the session from storage.
    ///
    /// A missing or unreadable stored token leaves the session logged out.
    /// Returns whether a token was restored.
    pub fn load(&self) -> bool {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                log::warn!("failed to read stored session: {e}");
                return false;
            }
        };

        match serde_json::from_str::<UserToken>(&raw) {
            Ok(token) => {
                let impersonating = match self.storage.get(&self.impersonation_key()) {
                    Ok(flag) => flag.as_deref() == Some("true"),
                    Err(e) => {
                        log::warn!("failed to read impersonation flag: {e}");
                        false
                    }
                };
                log::debug!("restored session for {}", token.user.email);
                self.set_state(Some(token), impersonating);
                true
            }
            Err(e) => {
                log::warn!("ignoring invalid stored session: {e}");
                false
            }
        }
    }

    fn store(&self, token: UserToken, impersonating: bool) -> Result<(), AuthError> {
        let raw = serde_json::to_string(&token).map_err(crate::error::StorageError::from)?;
        self.set_state(Some(token), impersonating);
        self.storage.set(&self.key, &raw)?;
        if impersonating {
            self.storage.set(&self.impersonation_key(), "true")?;
        } else {
            self.storage.remove(&self.impersonation_key())?;
        }
        Ok(())
    }

    /// Replace the session token and persist it. Ends any impersonation.
    ///
    /// The in-memory session is updated even if persisting fails.
    pub fn save_user_token(&self, token: UserToken) -> Result<(), AuthError> {
        self.store(token, false)
    }

    /// Switch to a token issued for another user an admin is acting as.
    pub fn start_impersonation(&self, token: UserToken) -> Result<(), AuthError> {
        log::debug!("impersonating {}", token.user.email);
        self.store(token, true)
    }

    /// Clear the session, its stored token and the impersonation flag.
    pub fn logout(&self) {
        self.set_state(None, false);
        for key in [self.key.clone(), self.impersonation_key()] {
            if let Err(e) = self.storage.remove(&key) {
                log::warn!("failed to remove stored session: {e}");
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().token.is_some()
    }

    /// Whether an admin is acting as the logged-in user.
    pub fn is_impersonating(&self) -> bool {
        let state = self.read();
        state.token.is_some() && state.impersonating
    }

    /// Current token, if logged in.
    pub fn token(&self) -> Option<UserToken> {
        self.read().token.clone()
    }

    /// Current user, if logged in.
    pub fn user(&self) -> Option<UserInfo> {
        self.token().map(|token| token.user)
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.is_admin)
    }

    /// Authorization header value for the current token.
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|token| token.as_bearer())
    }

    /// Swap the current token for a fresh one, keeping the impersonation flag.
    ///
    /// Does nothing and returns `Ok(false)` when logged out. If the
    /// refresher fails the session is logged out and the error returned.
    pub async fn refresh(&self, refresher: &dyn TokenRefresher) -> Result<bool, AuthError> {
        let Some(current) = self.token() else {
            return Ok(false);
        };

        match refresher.refresh(&current).await {
            Ok(fresh) => {
                self.store(fresh, self.is_impersonating())?;
                Ok(true)
            }
            Err(e) => {
                log::warn!("session refresh failed, logging out: {e}");
                self.logout();
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("key", &self.key)
            .field("logged_in", &self.is_logged_in())
            .field("impersonating", &self.is_impersonating())
            .finish()
    }
}

//! Tests for session refresh and the store bundle.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use starterkit::prelude::*;

fn user() -> UserInfo {
    UserInfo {
        id: 3,
        email: "linus@example.com".into(),
        first_name: "Linus".into(),
        last_name: "T".into(),
        is_admin: false,
    }
}

struct Rotating {
    calls: AtomicUsize,
}

#[async_trait]
impl TokenRefresher for Rotating {
    async fn refresh(&self, token: &UserToken) -> Result<UserToken, AuthError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(UserToken::new(format!("{}-{n}", token.access_token), token.user.clone()))
    }
}

struct Rejecting;

#[async_trait]
impl TokenRefresher for Rejecting {
    async fn refresh(&self, _token: &UserToken) -> Result<UserToken, AuthError> {
        Err(AuthError::rejected("expired"))
    }
}

#[tokio::test]
async fn test_refresh_replaces_and_persists_token() {
    let storage = Arc::new(MemoryStorage::new());
    let session = SessionStore::new(storage.clone(), "user-token");
    session.save_user_token(UserToken::new("abc", user())).unwrap();

    let refresher = Rotating {
        calls: AtomicUsize::new(0),
    };
    assert!(session.refresh(&refresher).await.unwrap());
    assert_eq!(session.bearer().as_deref(), Some("Bearer abc-1"));

    let restored = SessionStore::new(storage, "user-token");
    assert!(restored.load());
    assert_eq!(restored.token().unwrap().access_token, "abc-1");
}

#[tokio::test]
async fn test_refresh_when_logged_out_is_noop() {
    let session = SessionStore::new(Arc::new(MemoryStorage::new()), "user-token");
    let refresher = Rotating {
        calls: AtomicUsize::new(0),
    };

    assert!(!session.refresh(&refresher).await.unwrap());
    assert_eq!(refresher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rejected_refresh_logs_out() {
    let storage = Arc::new(MemoryStorage::new());
    let session = SessionStore::new(storage.clone(), "user-token");
    session.save_user_token(UserToken::new("abc", user())).unwrap();

    let err = session.refresh(&Rejecting).await.unwrap_err();

    assert!(matches!(err, AuthError::RefreshRejected(_)));
    assert!(!session.is_logged_in());
    assert!(storage.is_empty());
}

#[test]
fn test_starter_restores_session_and_guards_routes() {
    let storage = Arc::new(MemoryStorage::new());
    let config = StarterConfig::default().with_login_path("/signin");

    let anonymous = Starter::new(config.clone(), storage.clone());
    assert_eq!(
        anonymous.guard_route(RouteAuth::Required, "/billing"),
        GuardOutcome::Redirect {
            path: "/signin".into(),
            redirect: Some("/billing".into()),
        }
    );

    anonymous
        .session
        .save_user_token(UserToken::new("abc", user()))
        .unwrap();

    let restarted = Starter::new(config, storage);
    assert!(restarted.session.is_logged_in());
    assert!(restarted.guard_route(RouteAuth::Required, "/billing").is_allowed());
    assert!(!restarted.guard_admin().is_allowed());
}

#[test]
fn test_starter_uses_configured_capacities() {
    let starter = Starter::new(
        StarterConfig::default().with_toast_capacity(1),
        Arc::new(MemoryStorage::new()),
    );
    starter.toasts.error("one");
    starter.toasts.error("two");

    assert_eq!(starter.toasts.len(), 1);
    assert_eq!(starter.toasts.pop().unwrap().message, "two");
    assert_eq!(starter.config().toast_capacity, 1);
    assert_eq!(starter.locales.locale(), "fr");
}

#[test]
fn test_starter_clones_share_locale() {
    let starter = Starter::new(StarterConfig::default(), Arc::new(MemoryStorage::new()));
    let handle = starter.clone();

    handle
        .locales
        .add_locale("fr", "Français", serde_json::json!({ "hello": "Bonjour" }), serde_json::json!({}))
        .add_locale("en", "English", serde_json::json!({ "hello": "Hello" }), serde_json::json!({}));
    assert_eq!(starter.locales.translate("hello"), "Bonjour");

    assert!(handle.locales.set_locale("en"));
    assert_eq!(starter.locales.locale(), "en");
    assert_eq!(starter.locales.translate("hello"), "Hello");
}

#[test]
fn test_starter_admin_guard_allows_impersonation() {
    let storage = Arc::new(MemoryStorage::new());
    let starter = Starter::new(StarterConfig::default(), storage.clone());
    starter
        .session
        .start_impersonation(UserToken::new("as-user", user()))
        .unwrap();
    assert!(starter.guard_admin().is_allowed());

    let restarted = Starter::new(StarterConfig::default(), storage);
    assert!(restarted.session.is_impersonating());
    assert!(restarted.guard_admin().is_allowed());
}

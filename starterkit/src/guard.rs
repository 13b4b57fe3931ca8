//! Route guards.
//!
//! Pure navigation decisions over the session. The router that acts on
//! them lives elsewhere.

use crate::auth::SessionStore;

/// Authentication requirement declared by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteAuth {
    /// The route does not mention auth.
    #[default]
    None,
    /// The route requires a logged-in user.
    Required,
    /// The route opts in to auth handling but allows anonymous access.
    Optional,
}

impl RouteAuth {
    fn is_required(self) -> bool {
        matches!(self, Self::Required)
    }
}

/// Outcome of a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Continue to the requested route.
    Allow,
    /// Navigate to `path` instead, with an optional return location.
    Redirect {
        path: String,
        redirect: Option<String>,
    },
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Send logged-out users to the login page when the route requires auth.
///
/// `full_path` is the requested location, passed back so login can
/// return there.
pub fn auth_guard(
    auth: RouteAuth,
    session: &SessionStore,
    login_path: &str,
    full_path: &str,
) -> GuardOutcome {
    if !auth.is_required() || session.is_logged_in() {
        return GuardOutcome::Allow;
    }

    log::debug!("redirecting anonymous visitor from {full_path} to {login_path}");
    GuardOutcome::Redirect {
        path: login_path.to_string(),
        redirect: Some(full_path.to_string()),
    }
}

/// Send everyone but logged-in admins to the home page.
///
/// An admin acting as another user keeps access even though the
/// impersonated user is not an admin, so they can switch back.
pub fn admin_guard(session: &SessionStore, home_path: &str) -> GuardOutcome {
    if session.is_admin() || session.is_impersonating() {
        GuardOutcome::Allow
    } else {
        GuardOutcome::Redirect {
            path: home_path.to_string(),
            redirect: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::{MemoryStorage, UserInfo, UserToken};

    fn session(user: Option<bool>) -> SessionStore {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()), "user-token");
        if let Some(is_admin) = user {
            let info = UserInfo {
                id: 1,
                email: "a@example.com".into(),
                first_name: "A".into(),
                last_name: "B".into(),
                is_admin,
            };
            session.save_user_token(UserToken::new("t", info)).unwrap();
        }
        session
    }

    #[test]
    fn test_public_routes_allow_anyone() {
        let anonymous = session(None);
        assert!(auth_guard(RouteAuth::None, &anonymous, "/login", "/").is_allowed());
        assert!(auth_guard(RouteAuth::Optional, &anonymous, "/login", "/").is_allowed());
    }

    #[test]
    fn test_required_route_redirects_with_return_path() {
        let anonymous = session(None);
        assert_eq!(
            auth_guard(RouteAuth::Required, &anonymous, "/login", "/settings?tab=2"),
            GuardOutcome::Redirect {
                path: "/login".into(),
                redirect: Some("/settings?tab=2".into()),
            }
        );
    }

    #[test]
    fn test_required_route_allows_logged_in() {
        let user = session(Some(false));
        assert!(auth_guard(RouteAuth::Required, &user, "/login", "/settings").is_allowed());
    }

    #[test]
    fn test_admin_guard() {
        assert!(admin_guard(&session(Some(true)), "/").is_allowed());
        assert_eq!(
            admin_guard(&session(Some(false)), "/"),
            GuardOutcome::Redirect {
                path: "/".into(),
                redirect: None,
            }
        );
        assert!(!admin_guard(&session(None), "/").is_allowed());
    }

    #[test]
    fn test_admin_guard_allows_impersonating_session() {
        let session = session(None);
        let info = UserInfo {
            id: 2,
            email: "c@example.com".into(),
            first_name: "C".into(),
            last_name: "D".into(),
            is_admin: false,
        };
        session
            .start_impersonation(UserToken::new("as-c", info))
            .unwrap();

        assert!(!session.is_admin());
        assert!(admin_guard(&session, "/").is_allowed());

        session.logout();
        assert!(!admin_guard(&session, "/").is_allowed());
    }
}

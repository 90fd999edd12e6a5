//! Client-side session store.
//!
//! Lifecycle: [`SessionStore::init`] when the "who am I" request goes out,
//! [`SessionStore::set`] / [`SessionStore::clear`] when it resolves, and the
//! expiry pair [`SessionStore::on_unauthorized`] / [`SessionStore::finish_expiry`]
//! for a 401 seen on any other endpoint.

use super::auth::{is_allowed, Role, RouteAccess, UserInfo};
use crate::shared::api::is_auth_exempt;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// The session request is in flight.
    #[default]
    Loading,
    Anonymous,
    Authenticated(UserInfo),
}

/// Result of reporting a 401 to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryDecision {
    /// First 401 of an established session: the caller must run the
    /// logout flow and then call [`SessionStore::finish_expiry`].
    BeginExpiry,
    /// An expiry flow is already running.
    AlreadyExpiring,
    /// Auth endpoint, or nobody was logged in.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionStore {
    state: SessionState,
    expiring: bool,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.state = SessionState::Loading;
    }

    pub fn set(&mut self, user: UserInfo) {
        self.state = SessionState::Authenticated(user);
    }

    pub fn clear(&mut self) {
        self.state = SessionState::Anonymous;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().and_then(UserInfo::role)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn is_expiring(&self) -> bool {
        self.expiring
    }

    /// Reentrancy-guarded handling of a 401 coming back from `path`.
    /// Marks the session anonymous on the first call only.
    pub fn on_unauthorized(&mut self, path: &str) -> ExpiryDecision {
        if is_auth_exempt(path) {
            return ExpiryDecision::Ignore;
        }
        if self.expiring {
            return ExpiryDecision::AlreadyExpiring;
        }
        if !matches!(self.state, SessionState::Authenticated(_)) {
            return ExpiryDecision::Ignore;
        }
        self.expiring = true;
        self.state = SessionState::Anonymous;
        ExpiryDecision::BeginExpiry
    }

    pub fn finish_expiry(&mut self) {
        self.expiring = false;
    }

    /// While an expiry flow runs, protected routes hold the placeholder so
    /// the flow's own navigation is the only redirect to the login page.
    pub fn route_access(&self, allowed: &[Role]) -> RouteAccess {
        if self.expiring {
            return RouteAccess::Loading;
        }
        match &self.state {
            SessionState::Loading => RouteAccess::Loading,
            SessionState::Anonymous => RouteAccess::RedirectToLogin,
            SessionState::Authenticated(user) => {
                if is_allowed(user.role(), allowed) {
                    RouteAccess::Render
                } else {
                    RouteAccess::RedirectToNotAuthorized
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            role_raw: role.into(),
            name: Some("Test".into()),
            first_name: None,
            last_name: None,
            email: None,
        }
    }

    fn logged_in(role: &str) -> SessionStore {
        let mut store = SessionStore::new();
        store.set(user(role));
        store
    }

    #[test]
    fn test_loading_never_renders_or_redirects() {
        let store = SessionStore::new();
        assert_eq!(store.route_access(&[Role::Admin]), RouteAccess::Loading);
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        let mut store = SessionStore::new();
        store.clear();
        assert_eq!(
            store.route_access(&[Role::Admin]),
            RouteAccess::RedirectToLogin
        );
    }

    #[test]
    fn test_wrong_role_redirects_to_not_authorized() {
        let store = logged_in("doctor");
        assert_eq!(
            store.route_access(&[Role::Admin]),
            RouteAccess::RedirectToNotAuthorized
        );
    }

    #[test]
    fn test_allowed_role_renders() {
        let store = logged_in("admin");
        assert_eq!(store.route_access(&[Role::Admin]), RouteAccess::Render);
    }

    #[test]
    fn test_unknown_role_is_denied() {
        let store = logged_in("janitor");
        assert_eq!(
            store.route_access(&Role::ALL),
            RouteAccess::RedirectToNotAuthorized
        );
    }

    #[test]
    fn test_overlapping_401s_expire_once() {
        let mut store = logged_in("admin");

        // Two requests were issued while the session was valid; both come back 401.
        let first = store.on_unauthorized("/expense?page=1&limit=10");
        let second = store.on_unauthorized("/income?page=1&limit=10");

        assert_eq!(first, ExpiryDecision::BeginExpiry);
        assert_eq!(second, ExpiryDecision::AlreadyExpiring);
        assert_eq!(store.state(), &SessionState::Anonymous);

        store.finish_expiry();
        assert!(!store.is_expiring());
        // Nobody is logged in any more, so late 401s are no-ops too.
        assert_eq!(store.on_unauthorized("/bedroom"), ExpiryDecision::Ignore);
    }

    #[test]
    fn test_expiry_holds_routes_until_finished() {
        let mut store = logged_in("admin");
        assert_eq!(store.on_unauthorized("/expense"), ExpiryDecision::BeginExpiry);
        assert_eq!(store.route_access(&[Role::Admin]), RouteAccess::Loading);

        store.finish_expiry();
        assert_eq!(
            store.route_access(&[Role::Admin]),
            RouteAccess::RedirectToLogin
        );
    }

    #[test]
    fn test_auth_endpoints_are_exempt() {
        let mut store = logged_in("admin");
        assert_eq!(store.on_unauthorized("/user/me"), ExpiryDecision::Ignore);
        assert_eq!(store.on_unauthorized("/user/login"), ExpiryDecision::Ignore);
        assert!(store.user().is_some());
    }

    #[test]
    fn test_401_without_session_is_ignored() {
        let mut store = SessionStore::new();
        assert_eq!(store.on_unauthorized("/expense"), ExpiryDecision::Ignore);
        assert!(store.is_loading());
    }
}

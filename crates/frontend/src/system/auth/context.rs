use contracts::system::auth::{Role, RouteAccess, UserInfo};
use contracts::system::session::{ExpiryDecision, SessionStore};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;

/// Process-wide session handle. Copy it into async tasks freely; mutation
/// goes only through the methods below.
#[derive(Clone, Copy)]
pub struct SessionContext {
    store: RwSignal<SessionStore>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            store: RwSignal::new(SessionStore::new()),
        }
    }

    /// Asks the backend who is logged in. Until it answers, protected
    /// routes render the loading placeholder.
    pub fn init(&self) {
        self.store.update(|s| s.init());
        let this = *self;
        spawn_local(async move {
            match api::get_current_user().await {
                Ok(user) => {
                    log::info!("Session restored for {} ({})", user.display_name(), user.role_raw);
                    this.set(user);
                }
                Err(e) => {
                    log::info!("No active session: {}", e);
                    this.clear();
                }
            }
        });
    }

    pub fn set(&self, user: UserInfo) {
        self.store.try_update(|s| s.set(user));
    }

    pub fn clear(&self) {
        self.store.try_update(|s| s.clear());
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.store.with(|s| s.user().cloned())
    }

    pub fn role(&self) -> Option<Role> {
        self.store.with(|s| s.role())
    }

    pub fn route_access(&self, allowed: &[Role]) -> RouteAccess {
        self.store.with(|s| s.route_access(allowed))
    }

    pub fn is_expiring(&self) -> bool {
        self.store.with(|s| s.is_expiring())
    }

    /// Called by the API client for every 401. Only the first one of an
    /// established session flips the store into the expiry flow.
    pub fn handle_unauthorized(&self, path: &str) -> ExpiryDecision {
        let decision = self
            .store
            .try_update(|s| s.on_unauthorized(path))
            .unwrap_or(ExpiryDecision::Ignore);
        if decision == ExpiryDecision::BeginExpiry {
            log::warn!("Session expired (401 from {}), redirecting to login", path);
        }
        decision
    }

    pub fn finish_expiry(&self) {
        self.store.try_update(|s| s.finish_expiry());
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Session provider component
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let session = SessionContext::new();
    session.init();
    provide_context(session);

    children()
}

/// Hook to access the session
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider not found in component tree")
}

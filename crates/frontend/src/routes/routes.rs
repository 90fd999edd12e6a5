use contracts::domain::{self, ResourceDef};
use contracts::system::auth::{Role, LOGIN_PATH};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::{use_navigate, use_params_map};
use leptos_router::{path, NavigateOptions};

use crate::domain::ui::list::ResourcePage;
use crate::layout::Shell;
use crate::system::auth::context::use_session;
use crate::system::auth::guard::ProtectedRoute;
use crate::system::pages::home::HomePage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::not_authorized::NotAuthorizedPage;
use crate::system::pages::not_found::NotFoundPage;

/// Runs the navigation half of the session expiry flow. The API client
/// flips the session into expiry on the first 401; this sends the user to
/// the login page once and then closes the flow.
#[component]
fn SessionExpiryWatcher() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if session.is_expiring() {
            navigate(
                LOGIN_PATH,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
            session.finish_expiry();
        }
    });
}

#[component]
fn HomeRoute() -> impl IntoView {
    view! {
        <ProtectedRoute allowed=&Role::ALL>
            <Shell>
                <HomePage />
            </Shell>
        </ProtectedRoute>
    }
}

/// `/:resource` resolved against the department registry.
#[component]
fn ResourceRoute() -> impl IntoView {
    let params = use_params_map();
    let resource = Memo::new(move |_| {
        params
            .with(|p| p.get("resource"))
            .and_then(|key| domain::find(&key))
    });

    move || match resource.get() {
        Some(def) => {
            let allowed = def.allowed_roles;
            let def: StoredValue<ResourceDef> = StoredValue::new(def);
            view! {
                <ProtectedRoute allowed=allowed>
                    <Shell>
                        <ResourcePage resource=def.get_value() />
                    </Shell>
                </ProtectedRoute>
            }
            .into_any()
        }
        None => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <SessionExpiryWatcher />
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/not-authorized") view=NotAuthorizedPage />
                <Route path=path!("/") view=HomeRoute />
                <Route path=path!("/:resource") view=ResourceRoute />
            </Routes>
        </Router>
    }
}

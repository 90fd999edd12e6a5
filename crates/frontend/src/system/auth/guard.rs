use contracts::system::auth::{Role, RouteAccess, LOGIN_PATH, NOT_AUTHORIZED_PATH};
use leptos::prelude::*;
use leptos_router::components::Redirect;
use thaw::Spinner;

use super::context::use_session;

/// Renders `children` only for a session whose role is in `allowed`.
/// While the session is still being fetched a neutral placeholder is shown,
/// never the content and never a redirect.
#[component]
pub fn ProtectedRoute(allowed: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let access = Memo::new(move |_| session.route_access(allowed));

    move || match access.get() {
        RouteAccess::Loading => view! {
            <div class="page-loading">
                <Spinner />
                <span>"Checking session..."</span>
            </div>
        }
        .into_any(),
        RouteAccess::RedirectToLogin => view! { <Redirect path=LOGIN_PATH /> }.into_any(),
        RouteAccess::RedirectToNotAuthorized => {
            view! { <Redirect path=NOT_AUTHORIZED_PATH /> }.into_any()
        }
        RouteAccess::Render => children().into_any(),
    }
}

use contracts::system::auth::LOGIN_PATH;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::shared::icons::icon;
use crate::system::auth::api;
use crate::system::auth::context::use_session;

#[component]
pub fn TopHeader() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let (logging_out, set_logging_out) = signal(false);

    let logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        set_logging_out.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            // The local session ends whatever the server says.
            if let Err(e) = api::logout().await {
                log::warn!("Logout request failed: {}", e);
            }
            session.clear();
            set_logging_out.try_set(false);
            navigate(LOGIN_PATH, NavigateOptions::default());
        });
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Clinic Management"</span>
            </div>
            <div class="top-header__actions">
                <div class="top-header__user">
                    <span class="top-header__user-name">
                        {move || session.user().map(|u| u.display_name()).unwrap_or_default()}
                    </span>
                    <span class="top-header__user-role">
                        {move || session.role().map(|r| r.label()).unwrap_or_default()}
                    </span>
                </div>
                <button
                    class="top-header__icon-btn"
                    title="Log out"
                    disabled=move || logging_out.get()
                    on:click=logout
                >
                    {icon("logout")}
                </button>
            </div>
        </header>
    }
}

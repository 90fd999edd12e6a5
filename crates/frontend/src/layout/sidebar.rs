use contracts::domain::{self, ResourceDef};
use contracts::system::auth::is_allowed;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

/// Departments the current role may open.
fn visible_resources(role: Option<contracts::system::auth::Role>) -> Vec<ResourceDef> {
    domain::all()
        .into_iter()
        .filter(|r| is_allowed(role, r.allowed_roles))
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = use_session();
    let items = Memo::new(move |_| {
        visible_resources(session.role())
            .into_iter()
            .map(|r| (r.key, r.title, r.route))
            .collect::<Vec<_>>()
    });

    view! {
        <nav class="sidebar">
            <A href="/" attr:class="sidebar__item">
                {icon("dashboard")}
                <span class="sidebar__label">"Dashboard"</span>
            </A>
            <div class="sidebar__group-title">"Departments"</div>
            <For
                each=move || items.get()
                key=|(key, _, _)| *key
                children=move |(key, title, route)| {
                    view! {
                        <A href=route attr:class="sidebar__item">
                            {icon(key)}
                            <span class="sidebar__label">{title}</span>
                        </A>
                    }
                }
            />
        </nav>
    }
}

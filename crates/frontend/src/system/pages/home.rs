use contracts::domain;
use contracts::system::auth::is_allowed;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

/// Landing page: a card per department the role can open.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();

    let greeting = move || {
        session
            .user()
            .map(|u| format!("Welcome, {}", u.display_name()))
            .unwrap_or_else(|| "Welcome".to_string())
    };

    let cards = move || {
        let role = session.role();
        domain::all()
            .into_iter()
            .filter(|r| is_allowed(role, r.allowed_roles))
            .map(|r| {
                view! {
                    <A href=r.route attr:class="dashboard-card">
                        {icon(r.key)}
                        <span class="dashboard-card__title">{r.title}</span>
                    </A>
                }
            })
            .collect_view()
    };

    view! {
        <div class="page">
            <div class="page__header">
                <h1 class="page__title">{greeting}</h1>
            </div>
            <div class="page__content dashboard-grid">{cards}</div>
        </div>
    }
}

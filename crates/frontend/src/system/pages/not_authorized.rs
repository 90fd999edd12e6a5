use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::icons::icon;

#[component]
pub fn NotAuthorizedPage() -> impl IntoView {
    view! {
        <div class="status-page">
            {icon("lock")}
            <h1>"Not authorized"</h1>
            <p>"Your role does not have access to this page."</p>
            <A href="/">"Back to dashboard"</A>
        </div>
    }
}

/// Inline panel for a 403 coming back from a feature the role cannot use.
#[component]
pub fn AccessDeniedPanel(#[prop(into)] feature: String) -> impl IntoView {
    view! {
        <div class="alert alert--warning access-denied">
            {icon("lock")}
            <span>{format!("{} is not available for your role.", feature)}</span>
        </div>
    }
}

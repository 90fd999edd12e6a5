use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="status-page">
            <h1>"404"</h1>
            <p>"This page does not exist."</p>
            <A href="/">"Back to dashboard"</A>
        </div>
    }
}

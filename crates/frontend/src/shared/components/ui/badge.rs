use contracts::shared::table::StatusTone;
use leptos::prelude::*;

/// Coloured pill for record status values.
#[component]
pub fn StatusBadge(#[prop(into)] label: String, tone: StatusTone) -> impl IntoView {
    view! {
        <span class=format!("{} badge--status", tone.css_class())>{label}</span>
    }
}

use contracts::shared::pagination::PaginationState;
use leptos::prelude::*;

use crate::config::PAGE_SIZE_OPTIONS;
use crate::shared::icons::icon;

/// First/previous/next/last buttons, the "11-20 of 57" summary and the page
/// size picker. Pages are 1-based; the owner clamps whatever is requested.
#[component]
pub fn PaginationControls(
    #[prop(into)] state: Signal<PaginationState>,
    /// Rows actually shown on the current page.
    #[prop(into)]
    records_on_page: Signal<usize>,
    on_page_change: Callback<usize>,
    on_limit_change: Callback<usize>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    let busy = move || disabled.get().unwrap_or(false);
    let no_previous = move || busy() || !state.with(|s| s.has_previous());
    let no_next = move || busy() || !state.with(|s| s.has_next());

    let summary = move || {
        let s = state.get();
        match s.visible_range(records_on_page.get()) {
            Some((from, to)) => format!(
                "{}-{} of {} · page {} / {}",
                from, to, s.total_items, s.current_page, s.total_pages
            ),
            None => "No records".to_string(),
        }
    };

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=no_previous
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = state.get_untracked().current_page;
                    on_page_change.run(page.saturating_sub(1));
                }
                disabled=no_previous
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">{summary}</span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = state.get_untracked().current_page;
                    on_page_change.run(page + 1);
                }
                disabled=no_next
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(state.get_untracked().total_pages)
                disabled=no_next
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                disabled=busy
                on:change=move |ev| {
                    if let Ok(limit) = event_target_value(&ev).parse::<usize>() {
                        on_limit_change.run(limit);
                    }
                }
                prop:value=move || state.with(|s| s.limit.to_string())
            >
                {PAGE_SIZE_OPTIONS
                    .iter()
                    .map(|&size| {
                        view! {
                            <option
                                value=size.to_string()
                                selected=move || state.with(|s| s.limit == size)
                            >
                                {format!("{} / page", size)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

use contracts::shared::form::FieldOption;
use contracts::shared::select::{label_for, SelectKey, SelectOutcome, SelectState};
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::shared::icons::icon;

/// Combobox with type-to-filter, arrow key navigation and close on outside
/// click. The selected value is owned by the caller.
#[component]
pub fn SearchableSelect(
    #[prop(into)] options: Signal<Vec<FieldOption>>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional, into)] id: MaybeProp<String>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
    #[prop(optional, into)] invalid: MaybeProp<bool>,
) -> impl IntoView {
    let state = RwSignal::new(SelectState::default());
    let container = NodeRef::<leptos::html::Div>::new();
    let listbox_id = format!("listbox-{}", uuid::Uuid::new_v4());

    let is_disabled = move || disabled.get().unwrap_or(false);

    let apply = move |outcome: SelectOutcome| {
        if let SelectOutcome::Selected(picked) = outcome {
            on_change.run(picked);
        }
    };

    let outside = window_event_listener(ev::mousedown, move |ev| {
        let Some(root) = container.get_untracked() else {
            return;
        };
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
            .is_some_and(|node| root.contains(Some(&node)));
        if !inside {
            state.try_update(|s| s.on_outside_click());
        }
    });
    on_cleanup(move || outside.remove());

    let on_keydown = move |ev: ev::KeyboardEvent| {
        let key = SelectKey::from_key(&ev.key());
        if matches!(key, SelectKey::Enter | SelectKey::ArrowUp | SelectKey::ArrowDown) {
            ev.prevent_default();
        }
        let opts = options.get_untracked();
        if let Some(outcome) = state.try_update(|s| s.on_key(key, &opts)) {
            // Marks the Escape as handled so an enclosing ModalFrame stays open.
            if key == SelectKey::Escape && outcome.closed_dropdown() {
                ev.prevent_default();
            }
            apply(outcome);
        }
    };

    let display_text = move || {
        let s = state.get();
        if s.is_open() {
            return s.query().to_string();
        }
        let current = value.get();
        options.with(|opts| label_for(opts, &current).map(str::to_string))
            .unwrap_or(current)
    };

    let visible = move || {
        let s = state.get();
        options.with(|opts| {
            s.visible(opts)
                .into_iter()
                .cloned()
                .enumerate()
                .collect::<Vec<_>>()
        })
    };

    let listbox_for_input = listbox_id.clone();

    view! {
        <div
            class="searchable-select"
            class:searchable-select--open=move || state.with(|s| s.is_open())
            class:searchable-select--invalid=move || invalid.get().unwrap_or(false)
            node_ref=container
        >
            <div class="searchable-select__control">
                <input
                    type="text"
                    class="form__input searchable-select__input"
                    id=move || id.get()
                    role="combobox"
                    autocomplete="off"
                    aria-controls=listbox_for_input
                    aria-expanded=move || state.with(|s| s.is_open()).to_string()
                    placeholder=move || placeholder.get().unwrap_or_else(|| "Select...".to_string())
                    disabled=is_disabled
                    prop:value=display_text
                    on:focus=move |_| state.update(|s| s.open())
                    on:input=move |ev| {
                        let query = event_target_value(&ev);
                        state.update(|s| s.set_query(&query));
                    }
                    on:keydown=on_keydown
                />
                <span class="searchable-select__chevron">{icon("chevron-down")}</span>
            </div>
            <Show when=move || state.with(|s| s.is_open())>
                <ul class="searchable-select__menu" role="listbox" id=listbox_id.clone()>
                    {move || {
                        let rows = visible();
                        if rows.is_empty() {
                            return view! {
                                <li class="searchable-select__empty">"No matches"</li>
                            }
                            .into_any();
                        }
                        let highlighted = state.with(|s| s.highlighted());
                        let current = value.get();
                        rows.into_iter()
                            .map(|(index, option)| {
                                let picked = option.value.clone();
                                let is_selected = option.value == current;
                                view! {
                                    <li
                                        role="option"
                                        class="searchable-select__option"
                                        class:searchable-select__option--active={highlighted == Some(index)}
                                        aria-selected=is_selected.to_string()
                                        // mousedown beats the input's blur and the outside-click listener
                                        on:mousedown=move |ev: ev::MouseEvent| {
                                            ev.prevent_default();
                                            let outcome = state.try_update(|s| s.choose(&picked));
                                            if let Some(outcome) = outcome {
                                                apply(outcome);
                                            }
                                        }
                                    >
                                        {option.label}
                                    </li>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </ul>
            </Show>
        </div>
    }
}

mod state;

use contracts::domain::ResourceDef;
use contracts::shared::api::item_url;
use contracts::shared::form::controller::FormController;
use contracts::shared::form::FieldOption;
use contracts::shared::request_seq::RequestSequencer;
use contracts::shared::table::Record;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::AbortController;

use crate::config::SEARCH_DEBOUNCE_MS;
use crate::shared::components::data_table::DataTable;
use crate::shared::components::form_modal::FormModal;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::print_modal::PrintModal;
use crate::shared::components::ui::SearchableSelect;
use crate::shared::http::{use_api, ApiClient};
use crate::shared::icons::icon;
use crate::system::pages::not_authorized::AccessDeniedPanel;
use state::{create_state, ResourceListState};

/// Everything a list request needs; `Copy` so it can be moved into tasks.
#[derive(Clone, Copy)]
struct ListFetcher {
    api: ApiClient,
    state: RwSignal<ResourceListState>,
    sequencer: StoredValue<RequestSequencer>,
    in_flight: StoredValue<Option<AbortController>, LocalStorage>,
    endpoint: &'static str,
}

impl ListFetcher {
    /// Only the newest request may write into `state`. The one it replaces
    /// is aborted so the browser drops it as well.
    fn fetch(self) {
        if let Some(previous) = self.in_flight.try_update_value(|c| c.take()).flatten() {
            previous.abort();
        }
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        self.in_flight.set_value(controller);

        let Some(ticket) = self.sequencer.try_update_value(|s| s.next()) else {
            return;
        };
        let Some(path) = self.state.try_update(|s| {
            s.begin_load();
            s.list_path(self.endpoint)
        }) else {
            return;
        };

        spawn_local(async move {
            let result = self.api.get_list(&path, signal.as_ref()).await;
            let is_latest = self
                .sequencer
                .try_with_value(|s| s.is_latest(ticket))
                .unwrap_or(false);
            if !is_latest {
                log::debug!("GET {}: discarding superseded response", path);
                return;
            }
            if self.state.try_update(|s| s.apply_result(result)) == Some(true) {
                self.fetch();
            }
        });
    }

    fn abort(self) {
        if let Some(controller) = self.in_flight.try_update_value(|c| c.take()).flatten() {
            controller.abort();
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Body {
    AccessDenied,
    Loading,
    Table,
}

/// List, search, create, edit, delete and print for one department.
#[component]
pub fn ResourcePage(resource: ResourceDef) -> impl IntoView {
    let api = use_api();
    let state = create_state(&resource);
    let resource = StoredValue::new(resource);
    let endpoint = resource.with_value(|r| r.endpoint);
    let title = resource.with_value(|r| r.title);

    let in_flight = StoredValue::new_local(None::<AbortController>);
    let debounce_handle = StoredValue::new(None::<i32>);

    let form: RwSignal<Option<(String, FormController)>> = RwSignal::new(None);
    let print_batch: RwSignal<Option<Vec<Record>>> = RwSignal::new(None);
    let (search_input, set_search_input) = signal(String::new());

    let list = ListFetcher {
        api,
        state,
        sequencer: StoredValue::new(RequestSequencer::new()),
        in_flight,
        endpoint,
    };
    let load = move || list.fetch();

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load();
        }
    });

    let run_search = move |term: String| {
        let changed = state.try_update(|s| {
            if s.search_term == term {
                return false;
            }
            s.search_term = term;
            s.pagination.reset_page();
            true
        });
        if changed == Some(true) {
            load();
        }
    };

    let clear_pending_search = move || {
        if let Some(handle) = debounce_handle.try_update_value(|h| h.take()).flatten() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
    };

    let on_search_input = move |value: String| {
        set_search_input.set(value.clone());
        clear_pending_search();

        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move || run_search(value));
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref::<js_sys::Function>(),
            SEARCH_DEBOUNCE_MS as i32,
        ) {
            Ok(handle) => debounce_handle.set_value(Some(handle)),
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
    };

    on_cleanup(move || {
        clear_pending_search();
        list.abort();
    });

    let on_search_field_change = move |field: String| {
        let reload = state.try_update(|s| {
            s.search_field = field;
            s.pagination.reset_page();
            !s.search_term.trim().is_empty()
        });
        if reload == Some(true) {
            load();
        }
    };

    let on_category_change = move |category: String| {
        state.update(|s| {
            s.category = category;
            s.pagination.reset_page();
        });
        load();
    };

    let on_page_change = move |page: usize| {
        if !state.with_untracked(|s| s.is_paged()) {
            return;
        }
        if state.try_update(|s| s.pagination.go_to(page)).flatten().is_some() {
            load();
        }
    };

    let on_limit_change = move |limit: usize| {
        state.update(|s| s.pagination.set_limit(limit));
        load();
    };

    let open_create = move |_: leptos::ev::MouseEvent| {
        let controller = resource.with_value(|r| FormController::create(r.fields.clone(), r.endpoint));
        form.set(Some((format!("New {}", title), controller)));
    };

    let open_edit = move |index: usize| {
        let Some(record) = state.with_untracked(|s| s.records.get(index).cloned()) else {
            return;
        };
        let Some(id) = state.with_untracked(|s| s.id_at(index)) else {
            log::warn!("{}: row {} has no id, cannot edit", endpoint, index);
            return;
        };
        let controller = resource
            .with_value(|r| FormController::edit(r.fields.clone(), r.endpoint, &id, &record));
        form.set(Some((format!("Edit {}", title), controller)));
    };

    let remove = move |id: String| {
        spawn_local(async move {
            match api.delete(&item_url(endpoint, &id)).await {
                Ok(()) => {
                    log::info!("Deleted {} {}", endpoint, id);
                    state.try_update(|s| s.remove_record(&id));
                }
                Err(e) if e.is_silent() => {}
                Err(e) => {
                    state.try_update(|s| s.error = Some(e.user_message()));
                }
            }
        });
    };

    let print_one = move |index: usize| {
        if let Some(record) = state.with_untracked(|s| s.records.get(index).cloned()) {
            print_batch.set(Some(vec![record]));
        }
    };

    let print_selected = move |_: leptos::ev::MouseEvent| {
        let records = state.with_untracked(|s| s.selected_records());
        if !records.is_empty() {
            print_batch.set(Some(records));
        }
    };

    let search_options = resource.with_value(|r| {
        let mut opts = r.search_options();
        opts.push(FieldOption::new("Any field", ""));
        opts
    });
    let has_search = resource.with_value(|r| !r.search_fields.is_empty());
    let category_options = resource.with_value(|r| {
        let mut opts = vec![FieldOption::new("All categories", "")];
        opts.extend(r.categories.iter().map(|c| FieldOption::same(c)));
        opts
    });
    let has_categories = category_options.len() > 1;

    let records = Memo::new(move |_| state.with(|s| s.records.clone()));
    let selected = Memo::new(move |_| state.with(|s| s.selected.clone()));
    let pagination = Memo::new(move |_| state.with(|s| s.pagination));
    let body = Memo::new(move |_| {
        state.with(|s| {
            if s.forbidden {
                Body::AccessDenied
            } else if s.is_loading && s.records.is_empty() {
                Body::Loading
            } else {
                Body::Table
            }
        })
    });
    let is_loading = Signal::derive(move || state.with(|s| s.is_loading));
    let selected_count = move || state.with(|s| s.selected.len());

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{title}</h1>
                    <Badge>{move || state.with(|s| s.pagination.total_items).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=open_create>
                        {icon("plus")}
                        " New"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=print_selected
                        disabled=Signal::derive(move || selected_count() == 0)
                    >
                        {icon("printer")}
                        {move || format!(" Print selected ({})", selected_count())}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_: leptos::ev::MouseEvent| load()
                        disabled=is_loading
                    >
                        {icon("refresh")}
                        {move || if is_loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || state.with(|s| s.error.clone()).map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}

                <div class="filter-panel">
                    {has_search.then(|| view! {
                        <div class="filter-panel__search">
                            {icon("search")}
                            <select
                                class="form__select"
                                on:change=move |ev| on_search_field_change(event_target_value(&ev))
                                prop:value=move || state.with(|s| s.search_field.clone())
                            >
                                {search_options
                                    .iter()
                                    .map(|o| view! { <option value=o.value.clone()>{o.label.clone()}</option> })
                                    .collect_view()}
                            </select>
                            <input
                                type="search"
                                class="form__input"
                                placeholder="Search..."
                                prop:value=move || search_input.get()
                                on:input=move |ev| on_search_input(event_target_value(&ev))
                            />
                        </div>
                    })}
                    {has_categories.then(|| view! {
                        <div class="filter-panel__category">
                            <SearchableSelect
                                options=category_options.clone()
                                value=Signal::derive(move || state.with(|s| s.category.clone()))
                                on_change=Callback::new(on_category_change)
                                placeholder="All categories"
                            />
                        </div>
                    })}
                    <PaginationControls
                        state=pagination
                        records_on_page=Signal::derive(move || state.with(|s| s.records.len()))
                        on_page_change=Callback::new(on_page_change)
                        on_limit_change=Callback::new(on_limit_change)
                        disabled=Signal::derive(move || {
                            state.with(|s| s.is_loading || !s.is_paged())
                        })
                    />
                </div>

                {move || match body.get() {
                    Body::AccessDenied => view! { <AccessDeniedPanel feature=title /> }.into_any(),
                    Body::Loading => view! {
                        <div class="page-loading"><Spinner /></div>
                    }
                    .into_any(),
                    Body::Table => view! {
                        <DataTable
                            fields=resource.with_value(|r| r.fields.clone())
                            records=records
                            on_edit=Callback::new(open_edit)
                            on_remove=Callback::new(remove)
                            on_print=Callback::new(print_one)
                            selected=selected
                            on_toggle=Callback::new(move |(id, checked): (String, bool)| {
                                state.update(|s| s.set_selected(id, checked))
                            })
                            on_toggle_all=Callback::new(move |checked: bool| {
                                state.update(|s| s.select_all(checked))
                            })
                            empty_message=format!("No {} records found", title.to_lowercase())
                        />
                    }
                    .into_any(),
                }}
            </div>

            {move || form.get().map(|(heading, controller)| view! {
                <FormModal
                    title=heading
                    controller=controller
                    on_saved=Callback::new(move |_| load())
                    on_close=Callback::new(move |_| form.set(None))
                />
            })}

            {move || print_batch.get().map(|batch| view! {
                <PrintModal
                    title=title
                    fields=resource.with_value(|r| r.fields.clone())
                    print_fields=resource.with_value(|r| r.print_fields)
                    records=batch
                    on_close=Callback::new(move |_| print_batch.set(None))
                />
            })}
        </div>
    }
}

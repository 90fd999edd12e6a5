use std::collections::HashSet;

use contracts::shared::form::{FieldDescriptor, FieldType};
use contracts::shared::table::{format_record_cell, record_id, CellDisplay, Record, PLACEHOLDER};
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::ui::StatusBadge;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;

fn render_cell(display: CellDisplay) -> AnyView {
    match display {
        CellDisplay::Placeholder => view! {
            <span class="table__placeholder">{PLACEHOLDER}</span>
        }
        .into_any(),
        CellDisplay::Text(text) => view! { <span>{text}</span> }.into_any(),
        CellDisplay::Percent(text) => view! {
            <span class="badge badge--neutral">{text}</span>
        }
        .into_any(),
        CellDisplay::Money(text) => view! {
            <span class="table__money">{text}</span>
        }
        .into_any(),
        CellDisplay::Status { label, tone } => view! {
            <StatusBadge label=label tone=tone />
        }
        .into_any(),
    }
}

/// Records rendered against a field list with edit, print and remove
/// actions per row.
///
/// Remove only asks for confirmation and reports the id of the row the
/// dialog was opened for; the owner issues the delete and drops the row
/// once the backend has agreed.
#[component]
pub fn DataTable(
    fields: Vec<FieldDescriptor>,
    #[prop(into)] records: Signal<Vec<Record>>,
    on_edit: Callback<usize>,
    on_remove: Callback<String>,
    on_print: Callback<usize>,
    /// Ids of checked rows, for batch printing.
    #[prop(into)]
    selected: Signal<HashSet<String>>,
    on_toggle: Callback<(String, bool)>,
    on_toggle_all: Callback<bool>,
    #[prop(optional, into)] empty_message: MaybeProp<String>,
) -> impl IntoView {
    // Long free text stays out of the grid; it is shown on print and edit.
    let columns = StoredValue::new(
        fields
            .into_iter()
            .filter(|f| f.field_type != FieldType::Textarea)
            .collect::<Vec<_>>(),
    );
    let pending_remove = RwSignal::new(Option::<String>::None);

    let all_checked = move || {
        let rows = records.get();
        let sel = selected.get();
        !rows.is_empty()
            && rows
                .iter()
                .all(|r| record_id(r).is_some_and(|id| sel.contains(&id)))
    };

    let confirm_remove = move |_: leptos::ev::MouseEvent| {
        if let Some(id) = pending_remove.get_untracked() {
            pending_remove.set(None);
            on_remove.run(id);
        }
    };

    let header = move || {
        columns.with_value(|cols| {
            cols.iter()
                .map(|f| {
                    let label = f.label.clone();
                    view! { <TableHeaderCell>{label}</TableHeaderCell> }
                })
                .collect_view()
        })
    };

    let rows = move || {
        let sel = selected.get();
        records
            .get()
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let id = record_id(&record);
                let has_id = id.is_some();
                let is_checked = id.as_ref().is_some_and(|id| sel.contains(id));
                let remove_id = id.clone();
                let cells = columns.with_value(|cols| {
                    cols.iter()
                        .map(|f| {
                            let display = format_record_cell(f, &record);
                            view! { <TableCell>{render_cell(display)}</TableCell> }
                        })
                        .collect_view()
                });
                view! {
                    <TableRow>
                        <TableCell class="fixed-checkbox-column">
                            <input
                                type="checkbox"
                                class="table__checkbox"
                                disabled=!has_id
                                prop:checked=is_checked
                                on:change=move |ev| {
                                    if let Some(id) = id.clone() {
                                        on_toggle.run((id, event_target_checked(&ev)));
                                    }
                                }
                            />
                        </TableCell>
                        {cells}
                        <TableCell class="table__actions">
                            <button
                                class="button button--icon"
                                title="Edit"
                                on:click=move |_| on_edit.run(index)
                            >
                                {icon("edit")}
                            </button>
                            <button
                                class="button button--icon"
                                title="Print"
                                on:click=move |_| on_print.run(index)
                            >
                                {icon("printer")}
                            </button>
                            <button
                                class="button button--icon button--danger"
                                title="Delete"
                                disabled=!has_id
                                on:click=move |_| {
                                    if let Some(id) = remove_id.clone() {
                                        pending_remove.set(Some(id));
                                    }
                                }
                            >
                                {icon("trash")}
                            </button>
                        </TableCell>
                    </TableRow>
                }
            })
            .collect_view()
    };

    view! {
        <Show
            when=move || records.with(|r| !r.is_empty())
            fallback=move || {
                view! {
                    <div class="table__empty">
                        {move || empty_message.get().unwrap_or_else(|| "No records found".to_string())}
                    </div>
                }
            }
        >
            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell resizable=false class="fixed-checkbox-column">
                                <input
                                    type="checkbox"
                                    class="table__checkbox"
                                    prop:checked=all_checked
                                    on:change=move |ev| on_toggle_all.run(event_target_checked(&ev))
                                />
                            </TableHeaderCell>
                            {header}
                            <TableHeaderCell resizable=false>"Actions"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>{rows}</TableBody>
                </Table>
            </div>
        </Show>

        <Show when=move || pending_remove.with(|p| p.is_some())>
            <ModalFrame
                title="Delete record".to_string()
                on_close=Callback::new(move |_| pending_remove.set(None))
                modal_class="modal--confirm"
            >
                <p>"This record will be permanently deleted. Continue?"</p>
                <div class="modal-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| pending_remove.set(None)
                    >
                        "Cancel"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=confirm_remove>
                        "Delete"
                    </Button>
                </div>
            </ModalFrame>
        </Show>
    }
}

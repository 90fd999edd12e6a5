use contracts::shared::form::FieldDescriptor;
use contracts::shared::table::print::{build_sheets, PrintSheet};
use contracts::shared::table::Record;
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;

fn print_window() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.print() {
        log::error!("window.print failed: {:?}", e);
    }
}

fn sheet_view(title: String, sheet: PrintSheet) -> impl IntoView {
    view! {
        <section class="print-sheet">
            <header class="print-sheet__header">
                <h3>{title}</h3>
                {sheet.record_id.map(|id| view! { <span class="print-sheet__id">{format!("#{}", id)}</span> })}
            </header>
            <dl class="print-sheet__lines">
                {sheet
                    .lines
                    .into_iter()
                    .map(|line| {
                        view! {
                            <div class="print-sheet__line">
                                <dt>{line.label}</dt>
                                <dd>{line.value}</dd>
                            </div>
                        }
                    })
                    .collect_view()}
            </dl>
        </section>
    }
}

/// Print layout for one record or a checked batch. Table state is untouched.
#[component]
pub fn PrintModal(
    #[prop(into)] title: String,
    fields: Vec<FieldDescriptor>,
    print_fields: &'static [&'static str],
    records: Vec<Record>,
    on_close: Callback<()>,
) -> impl IntoView {
    let sheets = build_sheets(&fields, print_fields, &records);
    let heading = if sheets.len() > 1 {
        format!("Print {} ({} records)", title, sheets.len())
    } else {
        format!("Print {}", title)
    };

    view! {
        <ModalFrame title=heading on_close=on_close modal_class="modal--print">
            <div class="print-area">
                {sheets
                    .into_iter()
                    .map(|sheet| sheet_view(title.clone(), sheet))
                    .collect_view()}
            </div>
            <div class="modal-actions no-print">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Close"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| print_window()>
                    {icon("printer")}
                    " Print"
                </Button>
            </div>
        </ModalFrame>
    }
}

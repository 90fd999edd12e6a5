use contracts::shared::api::extract_record;
use contracts::shared::form::controller::{FormController, FormMessage};
use contracts::shared::form::{FieldDescriptor, FieldType};
use contracts::shared::table::record_id;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::config::FORM_CLOSE_DELAY_MS;
use crate::shared::components::ui::SearchableSelect;
use crate::shared::http::use_api;
use crate::shared::modal_frame::ModalFrame;

fn field_input(field: FieldDescriptor, form: RwSignal<FormController>) -> impl IntoView {
    let input_id = format!("field-{}", field.name);
    let name = StoredValue::new(field.name.clone());
    let value = Signal::derive(move || {
        name.with_value(|n| form.with(|c| c.values().input_value(n)))
    });
    let error = move || name.with_value(|n| form.with(|c| c.errors().get(n).map(str::to_string)));
    let has_error = move || error().is_some();
    let disabled = move || form.with(|c| c.is_submitting());
    let on_input = move |raw: String| {
        name.with_value(|n| form.update(|c| c.set_input(n, &raw)));
    };

    let control = match field.field_type {
        FieldType::Select => view! {
            <SearchableSelect
                id=input_id.clone()
                options=field.options.clone()
                value=value
                on_change=Callback::new(on_input)
                placeholder=format!("Select {}", field.label.to_lowercase())
                disabled=Signal::derive(disabled)
                invalid=Signal::derive(has_error)
            />
        }
        .into_any(),
        FieldType::Textarea => view! {
            <textarea
                id=input_id.clone()
                class="form__textarea"
                class:form__input--invalid=has_error
                rows=3
                disabled=disabled
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        }
        .into_any(),
        other => view! {
            <input
                id=input_id.clone()
                type=other.input_type()
                class="form__input"
                class:form__input--invalid=has_error
                step=(other == FieldType::Number).then_some("any")
                min=(other == FieldType::Number).then_some("0")
                disabled=disabled
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form__group">
            <label class="form__label" for=input_id>
                {field.label.clone()}
                {(!field.required).then(|| view! { <span class="form__optional">" (optional)"</span> })}
            </label>
            {control}
            {move || error().map(|e| view! { <div class="form__error">{e}</div> })}
        </div>
    }
}

/// Modal form generated from the controller's field list.
///
/// Submitting validates first; nothing is sent while any field is invalid or
/// a previous submit is still in flight. After a successful save `on_saved`
/// runs once and the modal closes after [`FORM_CLOSE_DELAY_MS`]. If the modal
/// is closed mid-flight the response is dropped.
#[component]
pub fn FormModal(
    #[prop(into)] title: String,
    controller: FormController,
    on_saved: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let fields = controller.fields().to_vec();
    let form = RwSignal::new(controller);
    let is_submitting = Signal::derive(move || form.with(|c| c.is_submitting()));

    let submit = move || {
        let Some(request) = form.try_update(|c| c.begin_submit()).flatten() else {
            return;
        };
        spawn_local(async move {
            let result = match api.submit(&request).await {
                Ok(body) => {
                    let saved_id = extract_record(&body).as_ref().and_then(record_id);
                    log::info!(
                        "{} {} saved ({})",
                        request.method.as_str(),
                        request.url,
                        saved_id.as_deref().unwrap_or("no id in response")
                    );
                    Ok(())
                }
                Err(e) => Err(e.user_message()),
            };

            let mut saved = false;
            if form.try_update(|c| c.complete(result, || saved = true)).is_none() {
                log::debug!("{} {}: form closed before response", request.method.as_str(), request.url);
                return;
            }
            if !saved {
                return;
            }
            on_saved.run(());
            TimeoutFuture::new(FORM_CLOSE_DELAY_MS).await;
            if form.try_with_untracked(|_| ()).is_some() {
                on_close.run(());
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submit();
    };

    let message = move || {
        form.with(|c| match c.message() {
            Some(FormMessage::Success(text)) => Some(view! {
                <div class="alert alert--success">{text.clone()}</div>
            }
            .into_any()),
            Some(FormMessage::Error(text)) => Some(view! {
                <div class="alert alert--error">{text.clone()}</div>
            }
            .into_any()),
            None => None,
        })
    };

    view! {
        <ModalFrame
            title=title
            on_close=on_close
            dismissable=Signal::derive(move || !is_submitting.get())
            modal_class="modal--form"
        >
            <form class="form" on:submit=on_submit novalidate=true>
                {message}
                <div class="form__grid">
                    {fields.into_iter().map(|f| field_input(f, form)).collect_view()}
                </div>
                <div class="modal-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                        disabled=is_submitting
                    >
                        "Cancel"
                    </Button>
                    <button
                        type="submit"
                        class="button button--primary"
                        disabled=move || is_submitting.get()
                    >
                        {move || if is_submitting.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </ModalFrame>
    }
}

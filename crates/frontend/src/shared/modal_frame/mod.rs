use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

/// Overlay plus dialog surface with a title bar.
///
/// Closes on Escape (unless a control inside already handled it) and on a click that both starts and ends on the overlay,
/// so selecting text inside the dialog and releasing outside keeps it open.
/// `dismissable` turns both off while the owner has work in flight.
#[component]
pub fn ModalFrame(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    #[prop(optional, into)] dismissable: MaybeProp<bool>,
    #[prop(optional, into)] modal_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);
    let can_dismiss = move || dismissable.get().unwrap_or(true);

    // Deferred to the next tick: the overlay may be torn down during its own
    // event dispatch otherwise.
    let request_close = move || {
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    let escape_handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && !ev.default_prevented() && can_dismiss() {
            request_close();
        }
    });
    on_cleanup(move || escape_handle.remove());

    let is_direct = |ev: &ev::MouseEvent| match (ev.target(), ev.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    };

    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get_untracked() && is_direct(&ev) && can_dismiss();
        overlay_mouse_down.set(false);
        if should_close {
            request_close();
        }
    };

    let surface_class = match modal_class {
        Some(cls) => format!("modal {cls}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=surface_class role="dialog" aria-modal="true">
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button
                        class="button button--icon modal__close"
                        aria-label="Close"
                        disabled=move || !can_dismiss()
                        on:click=move |_| on_close.run(())
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}

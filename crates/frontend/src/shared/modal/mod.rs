use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn Modal(
    title: String,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let handle = window_event_listener(ev::keydown, move |e| {
        if e.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}

/// Blocking alert for failures of user-triggered actions (export, delete,
/// upload). Shown while `message` holds `Some`.
#[component]
pub fn AlertModal(
    #[prop(into)]
    title: String,
    message: RwSignal<Option<String>>,
) -> impl IntoView {
    let title = StoredValue::new(title);
    let close = Callback::new(move |_| message.set(None));

    view! {
        <Show when=move || message.with(|m| m.is_some())>
            <Modal title=title.get_value() on_close=close>
                <div class="alert alert--error">
                    {icon("alert-triangle")}
                    <span>{move || message.get().unwrap_or_default()}</span>
                </div>
                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| close.run(())>
                        "OK"
                    </Button>
                </div>
            </Modal>
        </Show>
    }
}

/// Yes/No confirmation, shown while `pending` holds `Some`
#[component]
pub fn ConfirmModal<T>(
    #[prop(into)]
    title: String,
    pending: RwSignal<Option<T>>,
    /// Question text for the pending value
    describe: fn(&T) -> String,
    on_confirm: Callback<T>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let title = StoredValue::new(title);
    let close = Callback::new(move |_| pending.set(None));
    let confirm = move |_| {
        if let Some(value) = pending.get_untracked() {
            pending.set(None);
            on_confirm.run(value);
        }
    };

    view! {
        <Show when=move || pending.with(|p| p.is_some())>
            <Modal title=title.get_value() on_close=close>
                <p>{move || pending.with(|p| p.as_ref().map(describe).unwrap_or_default())}</p>
                <div class="modal-footer">
                    <Button on_click=move |_| close.run(())>"Cancel"</Button>
                    <Button appearance=ButtonAppearance::Primary on_click=confirm>"Delete"</Button>
                </div>
            </Modal>
        </Show>
    }
}

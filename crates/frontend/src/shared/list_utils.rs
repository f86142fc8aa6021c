use crate::shared::icons::icon;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use thaw::*;

/// Delay between the last keystroke and the search being applied
const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Search box with debounce; `on_change` gets the text once typing pauses
#[component]
pub fn SearchInput(
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let input_value = RwSignal::new(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    Effect::new(move |prev: Option<String>| {
        let text = input_value.get();
        // first run only records the initial text
        if prev.is_some() && prev.as_deref() != Some(text.as_str()) {
            let text_for_timer = text.clone();
            let timer = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                on_change.run(text_for_timer);
            });
            // dropping the previous Timeout cancels it
            pending.set_value(Some(timer));
        }
        text
    });

    // external resets (clear all filters)
    Effect::new(move |_| {
        let external = value.get();
        if external.is_empty() && !input_value.get_untracked().is_empty() {
            input_value.set(String::new());
        }
    });

    let is_active = move || !value.get().trim().is_empty();

    view! {
        <div class="search-input">
            {icon("search")}
            <Input value=input_value placeholder=placeholder />
            <Show when=is_active>
                <span
                    class="search-input__clear"
                    on:click=move |_| {
                        pending.set_value(None);
                        input_value.set(String::new());
                        on_change.run(String::new());
                    }
                >
                    {icon("x")}
                </span>
            </Show>
        </div>
    }
}

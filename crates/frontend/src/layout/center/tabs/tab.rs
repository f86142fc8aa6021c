use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::ev;
use leptos::prelude::*;

/// One entry of the tab strip
#[component]
pub fn Tab(tab: TabData) -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    let key = StoredValue::new(tab.key);
    let is_active = Memo::new(move |_| {
        tabs_store
            .active
            .with(|a| key.with_value(|k| a.as_deref() == Some(k.as_str())))
    });

    let on_click = move |_| key.with_value(|k| tabs_store.activate_tab(k));
    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        key.with_value(|k| tabs_store.close_tab(k));
    };

    view! {
        <div class="tab" class:active=is_active on:click=on_click>
            <span>{tab.title}</span>
            <button class="tab-close" title="Close" on:click=on_close>"×"</button>
        </div>
    }
}

use crate::layout::center::tabs::tab::Tab as TabComponent;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::tabs::TabPage;
use leptos::prelude::*;

/// Tab strip above the content of every opened tab
#[component]
pub fn Tabs() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    view! {
        <div class="tabs-container">
            <div class="tabs-bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabComponent tab=tab /> }
                />
            </div>
            <div class="tab-content">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab: TabData| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                />
                <Show when=move || tabs_store.opened.with(Vec::is_empty)>
                    <div class="placeholder">"Pick a report from the menu"</div>
                </Show>
            </div>
        </div>
    }
}

use leptos::prelude::*;

use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};

/// Content of one opened tab. Stays mounted while other tabs are active,
/// so filters and scroll position survive switching.
#[component]
pub fn TabPage(tab: TabData, tabs_store: AppGlobalContext) -> impl IntoView {
    let tab_key = tab.key.clone();
    let key_for_active = tab_key.clone();
    let is_active = move || tabs_store.active.with(|a| a.as_deref() == Some(key_for_active.as_str()));

    let content = render_tab_content(&tab_key);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab_key
        >
            {content}
        </div>
    }
}

use crate::dashboards::d400_store_summary;
use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::shared::page_meta::sync_document_title;
use leptos::prelude::*;

/// Shell with sidebar and tabs. Opens the tab named in the URL, or the
/// dashboard, and keeps the document title on the active page.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    tabs_store.init_router_integration(d400_store_summary::PAGE_ID);
    sync_document_title(tabs_store.active_meta());

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());

    view! { <MainLayout /> }
}

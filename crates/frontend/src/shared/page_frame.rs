//! PageFrame: root wrapper for every page rendered inside a tab.
//!
//! Sets `id="{page}--{category}"` and `data-page-category` on the root
//! element, e.g. `id="p900_payables--list"`.

use leptos::prelude::*;

/// Table of records with filters and exports
pub const PAGE_CAT_LIST: &str = "list";

/// Summary cards
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Edit form for a single record
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Action page (imports)
pub const PAGE_CAT_USECASE: &str = "usecase";

#[component]
pub fn PageFrame(
    /// `{page}--{category}`
    page_id: String,
    /// One of the `PAGE_CAT_*` constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_DETAIL => "page page--detail",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}

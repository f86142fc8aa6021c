//! Top bar: sidebar toggle, app title and the signed-in user.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::page_meta::APP_TITLE;
use crate::system::auth::storage;
use crate::system::profile;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let is_sidebar_visible = move || ctx.left_open.get();

    let user_label = match storage::get_user_id() {
        Some(id) => format!("User #{}", id),
        None => "Not signed in".to_string(),
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">{APP_TITLE}</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__user"
                    title="My profile"
                    on:click=move |_| ctx.open_page(profile::PAGE_ID)
                >
                    {icon("user")}
                    <span>{user_label}</span>
                </button>
            </div>
        </div>
    }
}

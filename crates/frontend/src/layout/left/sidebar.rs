//! Sidebar with collapsible menu groups

use crate::dashboards::d400_store_summary;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::projections::{
    p900_payables, p901_receivables, p902_low_stock, p903_expiring_stock, p904_drug_catalogue,
    p905_purchase_invoices, p906_pos_sales, p907_associates,
};
use crate::shared::icons::icon;
use crate::system::profile;
use crate::usecases::u501_drug_import;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: d400_store_summary::PAGE_ID,
            label: "Dashboard",
            icon: "bar-chart",
            items: vec![],
        },
        MenuGroup {
            id: "accounts",
            label: "Accounts",
            icon: "wallet",
            items: vec![
                (p900_payables::PAGE_ID, "wallet"),
                (p901_receivables::PAGE_ID, "receipt"),
            ],
        },
        MenuGroup {
            id: "inventory",
            label: "Inventory",
            icon: "package",
            items: vec![
                (p902_low_stock::PAGE_ID, "alert-triangle"),
                (p903_expiring_stock::PAGE_ID, "calendar"),
                (p904_drug_catalogue::PAGE_ID, "package"),
            ],
        },
        MenuGroup {
            id: "trade",
            label: "Purchases & Sales",
            icon: "shopping-cart",
            items: vec![
                (p905_purchase_invoices::PAGE_ID, "receipt"),
                (p906_pos_sales::PAGE_ID, "shopping-cart"),
            ],
        },
        MenuGroup {
            id: "associates",
            label: "Associates",
            icon: "users",
            items: vec![
                (p907_associates::SUPPLIERS_PAGE_ID, "users"),
                (p907_associates::EMPLOYEES_PAGE_ID, "users"),
                (p907_associates::DOCTORS_PAGE_ID, "users"),
            ],
        },
        MenuGroup {
            id: "tools",
            label: "Tools",
            icon: "upload",
            items: vec![(u501_drug_import::PAGE_ID, "upload")],
        },
        MenuGroup {
            id: "account",
            label: "Account",
            icon: "user",
            items: vec![(profile::PAGE_ID, "user")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    let groups = get_menu_groups();
    let expanded_groups = RwSignal::new(
        groups
            .iter()
            .filter(|g| !g.items.is_empty())
            .map(|g| g.id.to_string())
            .collect::<Vec<_>>(),
    );

    view! {
        <div class="app-sidebar__content">
            {groups.into_iter().map(|group| {
                let has_children = !group.items.is_empty();
                let group_id = group.id;

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || {
                                !has_children && ctx.active.with(|a| a.as_deref() == Some(group_id))
                            }
                            style:padding-left="12px"
                            on:click=move |_| {
                                if has_children {
                                    expanded_groups.update(|items| {
                                        if let Some(pos) = items.iter().position(|x| x == group_id) {
                                            items.remove(pos);
                                        } else {
                                            items.push(group_id.to_string());
                                        }
                                    });
                                } else {
                                    ctx.open_page(group_id);
                                }
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            {has_children.then(|| view! {
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=move || {
                                        expanded_groups.with(|e| e.iter().any(|x| x == group_id))
                                    }
                                >
                                    {icon("chevron-right")}
                                </div>
                            })}
                        </div>

                        {has_children.then(|| {
                            let items = StoredValue::new(group.items.clone());
                            view! {
                                <Show when=move || expanded_groups.with(|e| e.iter().any(|x| x == group_id))>
                                    <div class="app-sidebar__children">
                                        {items.get_value().into_iter().map(|(key, icon_name)| {
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || {
                                                        ctx.active.with(|a| a.as_deref() == Some(key))
                                                    }
                                                    style:padding-left="10px"
                                                    on:click=move |_| ctx.open_page(key)
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(icon_name)}
                                                        <span>{tab_label_for_key(key)}</span>
                                                    </div>
                                                </div>
                                            }
                                        }).collect_view()}
                                    </div>
                                </Show>
                            }
                        })}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tabs::page_meta_for_key;

    #[test]
    fn test_every_menu_entry_is_a_registered_page() {
        for group in get_menu_groups() {
            if group.items.is_empty() {
                assert!(page_meta_for_key(group.id).is_some(), "{}", group.id);
            }
            for (key, _) in group.items {
                assert!(page_meta_for_key(key).is_some(), "{}", key);
            }
        }
    }
}

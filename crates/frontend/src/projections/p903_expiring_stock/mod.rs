pub mod api;

use leptos::prelude::*;
use reports::{ColumnSpec, ReportSpec};

use crate::shared::page_meta::PageMeta;
use crate::shared::report_page::{ReportDefinition, ReportPage};

pub const PAGE_ID: &str = "p903_expiring_stock";
pub const META: PageMeta = PageMeta::new("Expiring Stock");

/// Look-ahead when the user has not picked a window
const DEFAULT_DAYS: u32 = 90;

pub fn definition() -> ReportDefinition {
    let spec = ReportSpec::new(META.title, "expiring_stock")
        .serial("Sr.No")
        .column(ColumnSpec::text("Drug", "drug"))
        .column(ColumnSpec::text("Batch", "batch_number"))
        .column(ColumnSpec::date("Expiry", "expiry_date"))
        .column(ColumnSpec::integer("Qty", "quantity"))
        .column(ColumnSpec::money("MRP", "mrp"))
        .column(ColumnSpec::money("Stock Value", "stock_value"))
        .total("quantity")
        .total("stock_value");

    ReportDefinition::new(PAGE_ID, META, spec, api::fetch_expiring_stock)
        .expiry_window(DEFAULT_DAYS)
        .contains("drug", "Drug")
        .contains("batch_number", "Batch")
        .dates("expiry_date", "Expiry")
}

#[component]
pub fn ExpiringStockReport() -> impl IntoView {
    view! { <ReportPage definition=definition() /> }
}

pub mod api;

use leptos::prelude::*;
use reports::{ColumnSpec, ReportSpec};

use crate::shared::page_meta::PageMeta;
use crate::shared::report_page::{ReportDefinition, ReportPage};

pub const PAGE_ID: &str = "p906_pos_sales";
pub const META: PageMeta = PageMeta::new("POS Sales");

pub fn definition() -> ReportDefinition {
    let spec = ReportSpec::new(META.title, "pos_sales")
        .serial("Sr.No")
        .column(ColumnSpec::text("Bill No", "bill_number"))
        .column(ColumnSpec::date("Date", "created_at"))
        .column(ColumnSpec::text("Customer", "customer").from_path("customer_name"))
        .column(ColumnSpec::text("Doctor", "doctor"))
        .column(ColumnSpec::text("Payment", "payment_mode"))
        .column(ColumnSpec::integer("Items", "item_count"))
        .column(ColumnSpec::money("Discount", "discount"))
        .column(ColumnSpec::money("Total", "total_amount"))
        .total("discount")
        .total("total_amount");

    ReportDefinition::new(PAGE_ID, META, spec, api::fetch_pos_sales)
        .date_range()
        .contains("customer", "Customer")
        .contains("payment_mode", "Payment")
        .range("total_amount", "Total")
        .server_excel("sales")
}

#[component]
pub fn PosSalesReport() -> impl IntoView {
    view! { <ReportPage definition=definition() /> }
}

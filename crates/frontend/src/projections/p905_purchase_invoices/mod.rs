pub mod api;

use leptos::prelude::*;
use reports::{ColumnSpec, ReportSpec};

use crate::shared::page_meta::PageMeta;
use crate::shared::report_page::{ReportDefinition, ReportPage};

pub const PAGE_ID: &str = "p905_purchase_invoices";
pub const META: PageMeta = PageMeta::new("Purchase Invoices");

pub fn definition() -> ReportDefinition {
    let spec = ReportSpec::new(META.title, "purchase_invoices")
        .serial("Sr.No")
        .column(ColumnSpec::text("Invoice", "invoice_number"))
        .column(ColumnSpec::date("Date", "invoice_date"))
        .column(ColumnSpec::text("Supplier", "supplier"))
        .column(ColumnSpec::integer("Items", "item_count"))
        .column(ColumnSpec::money("Taxable", "taxable_amount"))
        .column(ColumnSpec::money("GST", "gst_amount"))
        .column(ColumnSpec::money("Total", "total_amount"))
        .total("taxable_amount")
        .total("gst_amount")
        .total("total_amount");

    ReportDefinition::new(PAGE_ID, META, spec, api::fetch_purchase_invoices)
        .date_range()
        .contains("supplier", "Supplier")
        .contains("invoice_number", "Invoice")
        .range("total_amount", "Total")
        .server_excel("purchases")
}

#[component]
pub fn PurchaseInvoicesReport() -> impl IntoView {
    view! { <ReportPage definition=definition() /> }
}

pub mod api;

use leptos::prelude::*;
use reports::{ColumnSpec, ReportSpec};

use crate::shared::page_meta::PageMeta;
use crate::shared::report_page::{ReportDefinition, ReportPage};

pub const PAGE_ID: &str = "p901_receivables";
pub const META: PageMeta = PageMeta::new("Customer Receivables");

pub fn definition() -> ReportDefinition {
    let spec = ReportSpec::new(META.title, "receivables")
        .serial("Sr.No")
        .column(ColumnSpec::text("Customer", "customer").from_path("customer_name"))
        .column(ColumnSpec::text("Phone", "phone").from_path("customer_phone"))
        .column(ColumnSpec::text("Bill No", "bill_number"))
        .column(ColumnSpec::date("Bill Date", "bill_date"))
        .column(ColumnSpec::money("Amount", "amount"))
        .column(ColumnSpec::money("Received", "received").from_path("received_amount"))
        .column(ColumnSpec::money("Balance", "balance"))
        .total("amount")
        .total("received")
        .total("balance");

    ReportDefinition::new(PAGE_ID, META, spec, api::fetch_receivables)
        .date_range()
        .contains("customer", "Customer")
        .range("balance", "Balance")
        .server_excel("receivables")
}

#[component]
pub fn ReceivablesReport() -> impl IntoView {
    view! { <ReportPage definition=definition() /> }
}

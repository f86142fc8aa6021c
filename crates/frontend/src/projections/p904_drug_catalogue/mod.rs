pub mod api;

use leptos::prelude::*;
use reports::{ColumnSpec, ReportSpec};

use crate::shared::page_meta::PageMeta;
use crate::shared::report_page::{ReportDefinition, ReportPage};

pub const PAGE_ID: &str = "p904_drug_catalogue";
pub const META: PageMeta = PageMeta::new("Drug Catalogue");

pub fn definition() -> ReportDefinition {
    let spec = ReportSpec::new(META.title, "drugs")
        .serial("Sr.No")
        .column(ColumnSpec::text("Drug", "name"))
        .column(ColumnSpec::text("Generic Name", "generic_name"))
        .column(ColumnSpec::text("Manufacturer", "manufacturer"))
        .column(ColumnSpec::text("Category", "category"))
        .column(ColumnSpec::text("HSN", "hsn_code"))
        .column(ColumnSpec::text("Pack", "pack_size"))
        .column(ColumnSpec::number("GST %", "gst_rate", 1))
        .column(ColumnSpec::money("MRP", "mrp"))
        .column(ColumnSpec::integer("Stock", "quantity"))
        .total("quantity");

    ReportDefinition::new(PAGE_ID, META, spec, api::fetch_drugs)
        .contains("name", "Drug")
        .contains("manufacturer", "Manufacturer")
        .contains("category", "Category")
        .range("mrp", "MRP")
        .server_excel("drugs")
}

#[component]
pub fn DrugCatalogueReport() -> impl IntoView {
    view! { <ReportPage definition=definition() /> }
}

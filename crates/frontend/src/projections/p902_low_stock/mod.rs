pub mod api;

use leptos::prelude::*;
use reports::{ColumnSpec, ReportSpec};

use crate::shared::page_meta::PageMeta;
use crate::shared::report_page::{ReportDefinition, ReportPage};

pub const PAGE_ID: &str = "p902_low_stock";
pub const META: PageMeta = PageMeta::new("Low Stock / Reorder");

pub fn definition() -> ReportDefinition {
    let spec = ReportSpec::new(META.title, "low_stock")
        .serial("Sr.No")
        .column(ColumnSpec::text("Drug", "name"))
        .column(ColumnSpec::text("Manufacturer", "manufacturer"))
        .column(ColumnSpec::text("Supplier", "supplier"))
        .column(ColumnSpec::integer("In Stock", "quantity"))
        .column(ColumnSpec::integer("Reorder Level", "reorder_level"))
        .column(ColumnSpec::integer("Reorder Qty", "reorder_quantity"));

    ReportDefinition::new(PAGE_ID, META, spec, api::fetch_low_stock)
        .contains("name", "Drug")
        .contains("supplier", "Supplier")
        .range("quantity", "In Stock")
}

#[component]
pub fn LowStockReport() -> impl IntoView {
    view! { <ReportPage definition=definition() /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reports::normalize_rows;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        let def = definition();
        let rows = normalize_rows(&def.spec, &[json!({"name": "Dolo 650", "quantity": "4"})]);
        assert_eq!(
            def.spec.display_row(0, &rows[0]),
            vec!["1", "Dolo 650", "N/A", "N/A", "4", "0", "0"]
        );
    }
}

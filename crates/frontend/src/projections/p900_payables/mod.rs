pub mod api;

use leptos::prelude::*;
use reports::{ColumnSpec, ReportSpec};

use crate::shared::page_meta::PageMeta;
use crate::shared::report_page::{ReportDefinition, ReportPage};

pub const PAGE_ID: &str = "p900_payables";
pub const META: PageMeta = PageMeta::new("Supplier Payables");

pub fn definition() -> ReportDefinition {
    let spec = ReportSpec::new(META.title, "payables")
        .serial("Sr.No")
        .column(ColumnSpec::text("Supplier", "supplier"))
        .column(ColumnSpec::text("Invoice", "invoice").from_path("invoice_number"))
        .column(ColumnSpec::date("Invoice Date", "invoice_date"))
        .column(ColumnSpec::date("Due Date", "due_date"))
        .column(ColumnSpec::money("Amount", "amount"))
        .column(ColumnSpec::money("Paid", "paid").from_path("paid_amount"))
        .column(ColumnSpec::money("Balance", "balance"))
        .total("amount")
        .total("paid")
        .total("balance");

    ReportDefinition::new(PAGE_ID, META, spec, api::fetch_payables)
        .date_range()
        .contains("supplier", "Supplier")
        .range("balance", "Balance")
        .dates("due_date", "Due Date")
        .server_excel("payables")
}

#[component]
pub fn PayablesReport() -> impl IntoView {
    view! { <ReportPage definition=definition() /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reports::{aggregate, filter_rows, normalize_rows, ExportFormat, FilterCriteria, Predicate};
    use serde_json::json;

    #[test]
    fn test_payables_projection() {
        let def = definition();
        assert!(def.unknown_filter_keys().is_empty());

        let rows = normalize_rows(
            &def.spec,
            &[
                json!({"id": 1, "supplier": {"name": "Alpha"}, "invoice_number": "INV-1",
                       "invoice_date": "2024-04-01", "amount": "1,000.00", "paid_amount": 400, "balance": 600}),
                json!({"id": 2, "supplier": {"name": "Beta"}, "invoice_number": "INV-2", "amount": 250}),
            ],
        );
        assert_eq!(
            def.spec.display_row(0, &rows[0]),
            vec!["1", "Alpha", "INV-1", "01-04-2024", "N/A", "₹1000.00", "₹400.00", "₹600.00"]
        );

        let criteria = FilterCriteria::new().with("supplier", Predicate::Contains("BETA".into()));
        let shown = filter_rows(&def.spec, &rows, &criteria);
        let totals = aggregate(&def.spec, &shown);
        assert_eq!(totals.count, 1);
        assert_eq!(totals.sum("amount"), Some(250.0));
        assert_eq!(totals.sum("balance"), Some(0.0));
        assert_eq!(ExportFormat::Csv.file_name(&def.spec, chrono::NaiveDate::MIN), "payables.csv");
    }
}

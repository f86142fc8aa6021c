//! Suppliers, employees and doctors: one endpoint, three report pages.

pub mod api;

use contracts::shared::query::{AssociateType, ReportQuery};
use leptos::prelude::*;
use reports::{ColumnSpec, ListJoin, ReportSpec};

use crate::shared::page_meta::PageMeta;
use crate::shared::report_page::{ReportDefinition, ReportPage};

pub const SUPPLIERS_PAGE_ID: &str = "p907_suppliers";
pub const EMPLOYEES_PAGE_ID: &str = "p907_employees";
pub const DOCTORS_PAGE_ID: &str = "p907_doctors";

pub const SUPPLIERS_META: PageMeta = PageMeta::new("Suppliers");
pub const EMPLOYEES_META: PageMeta = PageMeta::new("Employees");
pub const DOCTORS_META: PageMeta = PageMeta::new("Doctors");

fn associates(page_id: &'static str, meta: PageMeta, kind: AssociateType, spec: ReportSpec) -> ReportDefinition {
    ReportDefinition::new(page_id, meta, spec, api::fetch_associates)
        .query(ReportQuery::associates(kind))
        .contains("name", "Name")
        .deletable("name", api::delete_associate)
}

pub fn suppliers() -> ReportDefinition {
    let spec = ReportSpec::new(SUPPLIERS_META.title, "suppliers")
        .serial("Sr.No")
        .column(ColumnSpec::text("Supplier", "name"))
        .column(ColumnSpec::text("Contact Person", "contact_person"))
        .column(ColumnSpec::text("Phone", "phone"))
        .column(ColumnSpec::text("Email", "email"))
        .column(ColumnSpec::text("GSTIN", "gst_number"))
        .column(ColumnSpec::list("Brands", "brands", ListJoin::Newline));

    associates(SUPPLIERS_PAGE_ID, SUPPLIERS_META, AssociateType::Supplier, spec)
        .contains("brands", "Brand")
}

pub fn employees() -> ReportDefinition {
    let spec = ReportSpec::new(EMPLOYEES_META.title, "employees")
        .serial("Sr.No")
        .column(ColumnSpec::text("Name", "name"))
        .column(ColumnSpec::text("Designation", "designation"))
        .column(ColumnSpec::text("Phone", "phone"))
        .column(ColumnSpec::text("Email", "email"))
        .column(ColumnSpec::date("Joined", "joining_date"))
        .column(ColumnSpec::money("Salary", "salary"))
        .total("salary");

    associates(EMPLOYEES_PAGE_ID, EMPLOYEES_META, AssociateType::Employee, spec)
        .contains("designation", "Designation")
}

pub fn doctors() -> ReportDefinition {
    let spec = ReportSpec::new(DOCTORS_META.title, "doctors")
        .serial("Sr.No")
        .column(ColumnSpec::text("Name", "name"))
        .column(ColumnSpec::text("Specialisation", "specialization"))
        .column(ColumnSpec::text("Clinic", "clinic_name"))
        .column(ColumnSpec::text("Phone", "phone"))
        .column(ColumnSpec::text("Reg. No", "registration_number"));

    associates(DOCTORS_PAGE_ID, DOCTORS_META, AssociateType::Doctor, spec)
        .contains("specialization", "Specialisation")
}

#[component]
pub fn SuppliersReport() -> impl IntoView {
    view! { <ReportPage definition=suppliers() /> }
}

#[component]
pub fn EmployeesReport() -> impl IntoView {
    view! { <ReportPage definition=employees() /> }
}

#[component]
pub fn DoctorsReport() -> impl IntoView {
    view! { <ReportPage definition=doctors() /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reports::{export::csv::encode_csv, filter_rows, normalize_rows, FilterCriteria, Predicate};
    use serde_json::json;

    #[test]
    fn test_each_page_queries_its_type() {
        let kinds: Vec<_> = [suppliers(), employees(), doctors()]
            .iter()
            .map(|d| d.base_query.associate_type)
            .collect();
        assert_eq!(
            kinds,
            vec![Some(AssociateType::Supplier), Some(AssociateType::Employee), Some(AssociateType::Doctor)]
        );
        for def in [suppliers(), employees(), doctors()] {
            assert!(def.unknown_filter_keys().is_empty(), "{}", def.page_id);
            assert!(def.delete.is_some());
        }
    }

    #[test]
    fn test_supplier_brands_one_per_line() {
        let def = suppliers();
        let rows = normalize_rows(
            &def.spec,
            &[
                json!({"id": 3, "name": "Sun Pharma", "brands": [{"name": "Pantocid"}, "Volini"]}),
                json!({"id": 4, "name": "Cipla", "brands": []}),
            ],
        );
        let cells = def.spec.display_row(0, &rows[0]);
        assert_eq!(cells[6], "Pantocid\nVolini");
        assert_eq!(def.spec.display_row(1, &rows[1])[6], "N/A");
        assert_eq!(rows[0].id.as_deref(), Some("3"));

        let criteria = FilterCriteria::new().with("brands", Predicate::Contains("volini".into()));
        let shown = filter_rows(&def.spec, &rows, &criteria);
        assert_eq!(shown.len(), 1);

        let csv = encode_csv(&def.spec, &shown).unwrap();
        assert!(csv.ends_with("\"Pantocid\nVolini\""));
    }
}

//! Tab key -> view. Every page reachable from the sidebar is listed here.

use leptos::prelude::*;

use crate::dashboards::{d400_store_summary, StoreSummaryDashboard};
use crate::projections::p900_payables::{self, PayablesReport};
use crate::projections::p901_receivables::{self, ReceivablesReport};
use crate::projections::p902_low_stock::{self, LowStockReport};
use crate::projections::p903_expiring_stock::{self, ExpiringStockReport};
use crate::projections::p904_drug_catalogue::{self, DrugCatalogueReport};
use crate::projections::p905_purchase_invoices::{self, PurchaseInvoicesReport};
use crate::projections::p906_pos_sales::{self, PosSalesReport};
use crate::projections::p907_associates::{
    self, DoctorsReport, EmployeesReport, SuppliersReport,
};
use crate::system::profile::{self, ProfilePage};
use crate::usecases::u501_drug_import::{self, DrugImportWidget};

pub fn render_tab_content(key: &str) -> AnyView {
    log::debug!("render tab '{}'", key);
    match key {
        d400_store_summary::PAGE_ID => view! { <StoreSummaryDashboard /> }.into_any(),

        p900_payables::PAGE_ID => view! { <PayablesReport /> }.into_any(),
        p901_receivables::PAGE_ID => view! { <ReceivablesReport /> }.into_any(),
        p902_low_stock::PAGE_ID => view! { <LowStockReport /> }.into_any(),
        p903_expiring_stock::PAGE_ID => view! { <ExpiringStockReport /> }.into_any(),
        p904_drug_catalogue::PAGE_ID => view! { <DrugCatalogueReport /> }.into_any(),
        p905_purchase_invoices::PAGE_ID => view! { <PurchaseInvoicesReport /> }.into_any(),
        p906_pos_sales::PAGE_ID => view! { <PosSalesReport /> }.into_any(),
        p907_associates::SUPPLIERS_PAGE_ID => view! { <SuppliersReport /> }.into_any(),
        p907_associates::EMPLOYEES_PAGE_ID => view! { <EmployeesReport /> }.into_any(),
        p907_associates::DOCTORS_PAGE_ID => view! { <DoctorsReport /> }.into_any(),

        u501_drug_import::PAGE_ID => view! { <DrugImportWidget /> }.into_any(),
        profile::PAGE_ID => view! { <ProfilePage /> }.into_any(),

        _ => {
            log::warn!("unknown tab '{}'", key);
            view! { <div class="placeholder">"Page not found"</div> }.into_any()
        }
    }
}

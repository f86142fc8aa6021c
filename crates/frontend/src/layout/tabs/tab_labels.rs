//! Tab titles come from the `META` each page declares.

use crate::dashboards::d400_store_summary;
use crate::projections::{
    p900_payables, p901_receivables, p902_low_stock, p903_expiring_stock, p904_drug_catalogue,
    p905_purchase_invoices, p906_pos_sales, p907_associates,
};
use crate::shared::page_meta::PageMeta;
use crate::system::profile;
use crate::usecases::u501_drug_import;

pub fn page_meta_for_key(key: &str) -> Option<PageMeta> {
    let meta = match key {
        d400_store_summary::PAGE_ID => d400_store_summary::META,

        p900_payables::PAGE_ID => p900_payables::META,
        p901_receivables::PAGE_ID => p901_receivables::META,
        p902_low_stock::PAGE_ID => p902_low_stock::META,
        p903_expiring_stock::PAGE_ID => p903_expiring_stock::META,
        p904_drug_catalogue::PAGE_ID => p904_drug_catalogue::META,
        p905_purchase_invoices::PAGE_ID => p905_purchase_invoices::META,
        p906_pos_sales::PAGE_ID => p906_pos_sales::META,
        p907_associates::SUPPLIERS_PAGE_ID => p907_associates::SUPPLIERS_META,
        p907_associates::EMPLOYEES_PAGE_ID => p907_associates::EMPLOYEES_META,
        p907_associates::DOCTORS_PAGE_ID => p907_associates::DOCTORS_META,

        u501_drug_import::PAGE_ID => u501_drug_import::META,
        profile::PAGE_ID => profile::META,

        _ => return None,
    };
    Some(meta)
}

/// Readable tab title; empty for unknown keys
pub fn tab_label_for_key(key: &str) -> &'static str {
    page_meta_for_key(key).map(|m| m.title).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key(p902_low_stock::PAGE_ID), "Low Stock / Reorder");
        assert_eq!(tab_label_for_key(d400_store_summary::PAGE_ID), "Dashboard");
        assert_eq!(tab_label_for_key("unknown_page"), "");
        assert!(page_meta_for_key("").is_none());
    }
}

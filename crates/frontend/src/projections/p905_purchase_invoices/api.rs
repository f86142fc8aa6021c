use contracts::shared::query::ReportQuery;
use web_sys::AbortSignal;

use crate::shared::api_utils::{get_rows, resource_url};
use crate::shared::report_page::RowsFuture;

pub fn fetch_purchase_invoices(query: ReportQuery, signal: Option<AbortSignal>) -> RowsFuture {
    Box::pin(async move {
        get_rows(&resource_url("/api/purchases/invoices/", &query), signal.as_ref(), "Failed to load purchase invoices").await
    })
}

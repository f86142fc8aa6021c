use contracts::shared::query::ReportQuery;
use web_sys::AbortSignal;

use crate::shared::api_utils::{get_rows, resource_url};
use crate::shared::report_page::RowsFuture;

/// Batches expiring within `query.days`
pub fn fetch_expiring_stock(query: ReportQuery, signal: Option<AbortSignal>) -> RowsFuture {
    Box::pin(async move {
        get_rows(&resource_url("/api/inventory/expiring/", &query), signal.as_ref(), "Failed to load expiring stock").await
    })
}

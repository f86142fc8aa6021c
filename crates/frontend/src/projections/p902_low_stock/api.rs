use contracts::shared::query::ReportQuery;
use web_sys::AbortSignal;

use crate::shared::api_utils::{get_rows, resource_url};
use crate::shared::report_page::RowsFuture;

/// Drugs at or below their reorder level
pub fn fetch_low_stock(query: ReportQuery, signal: Option<AbortSignal>) -> RowsFuture {
    Box::pin(async move {
        get_rows(&resource_url("/api/inventory/low-stock/", &query), signal.as_ref(), "Failed to load low stock items").await
    })
}

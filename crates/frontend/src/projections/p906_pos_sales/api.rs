use contracts::shared::query::ReportQuery;
use web_sys::AbortSignal;

use crate::shared::api_utils::{get_rows, resource_url};
use crate::shared::report_page::RowsFuture;

/// Counter bills in the selected period
pub fn fetch_pos_sales(query: ReportQuery, signal: Option<AbortSignal>) -> RowsFuture {
    Box::pin(async move {
        get_rows(&resource_url("/api/pos/sales/", &query), signal.as_ref(), "Failed to load sales").await
    })
}

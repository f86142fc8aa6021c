use contracts::shared::query::ReportQuery;
use web_sys::AbortSignal;

use crate::shared::api_utils::{get_rows, resource_url};
use crate::shared::report_page::RowsFuture;

/// Unpaid customer credit bills
pub fn fetch_receivables(query: ReportQuery, signal: Option<AbortSignal>) -> RowsFuture {
    Box::pin(async move {
        get_rows(&resource_url("/api/accounts/receivables/", &query), signal.as_ref(), "Failed to load receivables").await
    })
}

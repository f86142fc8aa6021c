use contracts::shared::query::ReportQuery;
use web_sys::AbortSignal;

use crate::shared::api_utils::{get_rows, resource_url};
use crate::shared::report_page::RowsFuture;

/// Outstanding supplier invoices
pub fn fetch_payables(query: ReportQuery, signal: Option<AbortSignal>) -> RowsFuture {
    Box::pin(async move {
        get_rows(
            &resource_url("/api/accounts/payables/", &query),
            signal.as_ref(),
            "Failed to load payables",
        )
        .await
    })
}

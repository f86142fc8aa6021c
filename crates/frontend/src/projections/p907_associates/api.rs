use contracts::shared::query::ReportQuery;
use web_sys::AbortSignal;

use crate::shared::api_utils::{api_url, delete, get_rows, resource_url};
use crate::shared::report_page::{DeleteFuture, RowsFuture};

/// Suppliers, employees or doctors, depending on `query.associate_type`
pub fn fetch_associates(query: ReportQuery, signal: Option<AbortSignal>) -> RowsFuture {
    Box::pin(async move {
        get_rows(
            &resource_url("/api/associates/", &query),
            signal.as_ref(),
            "Failed to load associates",
        )
        .await
    })
}

pub fn delete_associate(id: String) -> DeleteFuture {
    Box::pin(async move {
        let url = api_url(&format!("/api/associates/{}/", urlencoding::encode(&id)));
        delete(&url, None, "Failed to delete associate").await
    })
}

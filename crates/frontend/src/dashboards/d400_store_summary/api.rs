use contracts::dashboards::d400_store_summary::StoreSummaryResponse;
use contracts::shared::api_error::FetchError;
use web_sys::AbortSignal;

use crate::shared::api_utils::{api_url, get_json};

/// Headline figures for the landing page
pub async fn fetch_store_summary(signal: Option<AbortSignal>) -> Result<StoreSummaryResponse, FetchError> {
    get_json(
        &api_url("/api/dashboard/summary/"),
        signal.as_ref(),
        "Failed to load dashboard",
    )
    .await
}

use contracts::shared::api_error::FetchError;
use contracts::shared::business_info::BusinessInfo;
use web_sys::AbortSignal;

use super::api_utils::{api_url, get_json};

/// Store details printed at the top of PDF exports
pub async fn fetch_business_info(signal: Option<AbortSignal>) -> Result<BusinessInfo, FetchError> {
    get_json(
        &api_url("/api/business-info/"),
        signal.as_ref(),
        "Failed to load business details",
    )
    .await
}

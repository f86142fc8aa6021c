use contracts::shared::api_error::FetchError;
use contracts::system::users::{UpdateProfileDto, UserProfile};
use web_sys::AbortSignal;

use crate::shared::api_utils::{api_url, get_json, put_json};
use crate::system::auth::storage;

fn profile_url(user_id: &str) -> String {
    api_url(&format!("/api/users/{}/profile/", urlencoding::encode(user_id)))
}

/// Profile of the signed-in user
pub async fn fetch_profile(signal: Option<AbortSignal>) -> Result<UserProfile, FetchError> {
    let user_id = storage::get_user_id().ok_or(FetchError::NotSignedIn)?;
    get_json(&profile_url(&user_id), signal.as_ref(), "Failed to load profile").await
}

/// Callers validate `dto` first; this only sends it
pub async fn update_profile(dto: UpdateProfileDto) -> Result<UserProfile, FetchError> {
    let user_id = storage::get_user_id().ok_or(FetchError::NotSignedIn)?;
    put_json(&profile_url(&user_id), &dto, None, "Failed to update profile").await
}

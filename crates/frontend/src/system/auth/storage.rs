//! Signed-in user id kept in localStorage by the login flow.

use web_sys::window;

const USER_ID_KEY: &str = "chemist_user_id";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Stored values written by older clients may be literal `"null"`
fn clean_user_id(raw: Option<String>) -> Option<String> {
    raw.map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && id != "null" && id != "undefined")
}

pub fn get_user_id() -> Option<String> {
    clean_user_id(get_local_storage()?.get_item(USER_ID_KEY).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_user_id() {
        assert_eq!(clean_user_id(Some(" 42 ".into())), Some("42".into()));
        assert_eq!(clean_user_id(Some("null".into())), None);
        assert_eq!(clean_user_id(Some("".into())), None);
        assert_eq!(clean_user_id(None), None);
    }
}

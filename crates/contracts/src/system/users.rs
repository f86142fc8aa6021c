use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Per-field validation failure shown inline under the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl UpdateProfileDto {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            full_name: profile.full_name.clone().unwrap_or_default(),
            email: profile.email.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
        }
    }

    /// Check the form before anything is sent.
    ///
    /// Returns every failing field, in form order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.full_name.trim().is_empty() {
            errors.push(FieldError::new("full_name", "Name is required"));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !looks_like_email(email) {
            errors.push(FieldError::new("email", "Enter a valid email address"));
        }

        let phone = self.phone.trim();
        if !phone.is_empty() && !(phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())) {
            errors.push(FieldError::new("phone", "Phone number must be 10 digits"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> UpdateProfileDto {
        UpdateProfileDto {
            full_name: "Asha Rao".into(),
            email: "asha@citychemist.in".into(),
            phone: "9876543210".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(valid().validate().is_ok());
        let no_phone = UpdateProfileDto {
            phone: String::new(),
            ..valid()
        };
        assert!(no_phone.validate().is_ok());
    }

    #[test]
    fn test_all_errors_reported_in_order() {
        let dto = UpdateProfileDto {
            full_name: "  ".into(),
            email: "asha@".into(),
            phone: "98765".into(),
        };
        let errors = dto.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["full_name", "email", "phone"]);
    }

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@@b.co"));
        assert!(!looks_like_email("a b@c.co"));
    }

    #[test]
    fn test_from_profile_fills_blanks() {
        let profile = UserProfile {
            id: "42".into(),
            full_name: Some("Asha".into()),
            ..Default::default()
        };
        let dto = UpdateProfileDto::from_profile(&profile);
        assert_eq!(dto.full_name, "Asha");
        assert_eq!(dto.email, "");
    }
}

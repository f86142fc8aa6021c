use serde::{Deserialize, Serialize};

/// Outcome of a drug catalogue spreadsheet upload.
///
/// Counts the backend does not report are left at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugImportResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub skipped: u64,
    /// Row-level problems, e.g. `"Row 14: missing batch number"`
    #[serde(default)]
    pub errors: Vec<String>,
}

impl DrugImportResponse {
    pub fn summary(&self) -> String {
        let counts = format!(
            "{} added, {} updated, {} skipped",
            self.created, self.updated, self.skipped
        );
        match self.message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            Some(message) => format!("{} ({})", message, counts),
            None => counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let r: DrugImportResponse = serde_json::from_str(
            r#"{"message": "Import finished", "created": 12, "updated": 3, "errors": ["Row 4: bad expiry"]}"#,
        )
        .unwrap();
        assert_eq!(r.summary(), "Import finished (12 added, 3 updated, 0 skipped)");
        assert_eq!(r.errors.len(), 1);
    }

    #[test]
    fn test_summary_without_message() {
        let r: DrugImportResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(r.summary(), "0 added, 0 updated, 0 skipped");
    }
}

use serde::{Deserialize, Serialize};

/// Store details printed in the header block of exported PDF reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub licence_number: Option<String>,
    #[serde(default)]
    pub gst_number: Option<String>,
}

impl BusinessInfo {
    /// Header lines in print order, skipping blank fields
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(name) = non_blank(&self.store_name) {
            lines.push(name.to_string());
        }
        if let Some(address) = non_blank(&self.address) {
            lines.push(address.to_string());
        }
        if let Some(phone) = non_blank(&self.phone) {
            lines.push(format!("Phone: {}", phone));
        }
        if let Some(licence) = non_blank(&self.licence_number) {
            lines.push(format!("DL No: {}", licence));
        }
        if let Some(gst) = non_blank(&self.gst_number) {
            lines.push(format!("GSTIN: {}", gst));
        }
        lines
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lines_skip_blank_fields() {
        let info = BusinessInfo {
            store_name: Some("City Chemist".into()),
            address: Some("  ".into()),
            phone: Some("9876543210".into()),
            licence_number: None,
            gst_number: Some("27ABCDE1234F1Z5".into()),
        };
        assert_eq!(
            info.header_lines(),
            vec!["City Chemist", "Phone: 9876543210", "GSTIN: 27ABCDE1234F1Z5"]
        );
    }

    #[test]
    fn test_partial_payload_deserializes() {
        let info: BusinessInfo = serde_json::from_str(r#"{"store_name":"Apollo"}"#).unwrap();
        assert_eq!(info.store_name.as_deref(), Some("Apollo"));
        assert!(info.address.is_none());
    }
}

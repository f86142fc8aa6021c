//! Scalar parameters accepted by report endpoints.
//!
//! Serialized into the query string by the frontend (`serde_qs`); unset
//! fields are omitted so the backend applies its own defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssociateType {
    Supplier,
    Employee,
    Doctor,
}

impl AssociateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociateType::Supplier => "supplier",
            AssociateType::Employee => "employee",
            AssociateType::Doctor => "doctor",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Look-ahead window for expiry reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub associate_type: Option<AssociateType>,
}

impl ReportQuery {
    pub fn with_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            from,
            to,
            ..Default::default()
        }
    }

    pub fn associates(kind: AssociateType) -> Self {
        Self {
            associate_type: Some(kind),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &ReportQuery::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_are_omitted() {
        let q = ReportQuery::with_range(NaiveDate::from_ymd_opt(2024, 4, 1), None);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json, serde_json::json!({ "from": "2024-04-01" }));
    }

    #[test]
    fn test_associate_type_wire_name() {
        let q = ReportQuery::associates(AssociateType::Doctor);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "doctor" }));
        assert!(!q.is_empty());
        assert!(ReportQuery::default().is_empty());
    }
}

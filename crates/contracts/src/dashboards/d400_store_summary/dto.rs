use serde::{Deserialize, Serialize};

/// Headline figures for the dashboard landing page.
///
/// Every field is optional on the wire; a partially filled payload still
/// renders, with missing figures shown as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSummaryResponse {
    #[serde(default)]
    pub today_sales: Option<f64>,
    #[serde(default)]
    pub today_bills: Option<i64>,
    #[serde(default)]
    pub payables_due: Option<f64>,
    #[serde(default)]
    pub receivables_due: Option<f64>,
    #[serde(default)]
    pub low_stock_count: Option<i64>,
    #[serde(default)]
    pub expiring_count: Option<i64>,
    /// Daily sales for the trailing week, oldest first
    #[serde(default)]
    pub sales_trend: Vec<DailySales>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: String,
    #[serde(default)]
    pub amount: f64,
}

impl StoreSummaryResponse {
    /// Total of the trend series, used as the card subtitle
    pub fn week_total(&self) -> f64 {
        self.sales_trend.iter().map(|d| d.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_defaults() {
        let s: StoreSummaryResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(s, StoreSummaryResponse::default());
        assert_eq!(s.week_total(), 0.0);
    }

    #[test]
    fn test_week_total() {
        let s: StoreSummaryResponse = serde_json::from_str(
            r#"{"today_sales": 1200.5, "sales_trend": [
                {"date": "2024-04-01", "amount": 100.0},
                {"date": "2024-04-02", "amount": 250.25},
                {"date": "2024-04-03"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(s.today_sales, Some(1200.5));
        assert_eq!(s.week_total(), 350.25);
    }
}

//! Client-side filtering and totals over normalized rows.
//!
//! Filtering is pure and keeps the original relative order. Totals are
//! always computed from the rows handed in, i.e. the filtered set.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{CellValue, ReportRow, ReportSpec, SummaryTotals};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Case-insensitive substring of the cell's display text
    Contains(String),
    /// Inclusive numeric range; an absent bound is unbounded
    Range { min: Option<f64>, max: Option<f64> },
    /// Inclusive date range; an absent bound is unbounded
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl Predicate {
    /// A predicate with no usable input matches everything
    pub fn is_unset(&self) -> bool {
        match self {
            Predicate::Contains(text) => text.trim().is_empty(),
            Predicate::Range { min, max } => min.is_none() && max.is_none(),
            Predicate::DateRange { from, to } => from.is_none() && to.is_none(),
        }
    }

    fn matches(&self, value: &CellValue, display: &str) -> bool {
        if self.is_unset() {
            return true;
        }
        match self {
            Predicate::Contains(needle) => contains_ci(display, needle),
            Predicate::Range { min, max } => match value.as_number() {
                Some(n) => {
                    n >= min.unwrap_or(f64::NEG_INFINITY) && n <= max.unwrap_or(f64::INFINITY)
                }
                None => false,
            },
            Predicate::DateRange { from, to } => match value.as_date() {
                Some(d) => from.map_or(true, |f| d >= f) && to.map_or(true, |t| d <= t),
                None => false,
            },
        }
    }
}

/// User-entered filter state of one report page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Column key -> predicate
    pub predicates: BTreeMap<String, Predicate>,
    /// Free text matched against every cell
    pub search: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, predicate: Predicate) -> Self {
        self.set(key, predicate);
        self
    }

    pub fn set(&mut self, key: &str, predicate: Predicate) {
        if predicate.is_unset() {
            self.predicates.remove(key);
        } else {
            self.predicates.insert(key.to_string(), predicate);
        }
    }

    pub fn clear(&mut self, key: &str) {
        self.predicates.remove(key);
    }

    pub fn with_search(mut self, text: &str) -> Self {
        self.search = text.to_string();
        self
    }

    /// Number of criteria that actually restrict rows (badge count)
    pub fn active_count(&self) -> usize {
        let search = usize::from(!self.search.trim().is_empty());
        search + self.predicates.values().filter(|p| !p.is_unset()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    fn matches(&self, spec: &ReportSpec, row: &ReportRow) -> bool {
        for (key, predicate) in &self.predicates {
            let Some(col) = spec.column_by_key(key) else {
                log::debug!("filter on unknown column '{}' ignored", key);
                continue;
            };
            let value = row.get(key).unwrap_or(&CellValue::Empty);
            let display = col.display(value, &spec.format);
            if !predicate.matches(value, &display) {
                return false;
            }
        }

        let search = self.search.trim();
        if search.is_empty() {
            return true;
        }
        spec.columns.iter().any(|col| {
            row.get(&col.key)
                .map(|v| contains_ci(&col.display(v, &spec.format), search))
                .unwrap_or(false)
        })
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(&needle.trim().to_lowercase())
}

/// Rows matching every criterion, in their original order
pub fn filter_rows(spec: &ReportSpec, rows: &[ReportRow], criteria: &FilterCriteria) -> Vec<ReportRow> {
    if criteria.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| criteria.matches(spec, row))
        .cloned()
        .collect()
}

/// Record count and per-column sums of `rows`. An empty slice gives zeros.
pub fn aggregate(spec: &ReportSpec, rows: &[ReportRow]) -> SummaryTotals {
    let sums = spec
        .total_keys
        .iter()
        .map(|key| {
            let sum = rows
                .iter()
                .filter_map(|row| row.get(key).and_then(CellValue::as_number))
                .sum::<f64>();
            (key.clone(), sum)
        })
        .collect();

    SummaryTotals {
        count: rows.len(),
        sums,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnSpec;
    use crate::normalize::normalize_rows;
    use serde_json::json;

    fn spec() -> ReportSpec {
        ReportSpec::new("Payables", "payables")
            .serial("Sr.No")
            .column(ColumnSpec::text("Supplier", "supplier"))
            .column(ColumnSpec::text("Invoice", "invoice"))
            .column(ColumnSpec::money("Amount", "amount"))
            .column(ColumnSpec::money("Paid", "paid"))
            .column(ColumnSpec::date("Date", "date"))
            .total("amount")
            .total("paid")
    }

    fn rows() -> Vec<ReportRow> {
        normalize_rows(
            &spec(),
            &[
                json!({"supplier": "Alpha", "invoice": "1", "amount": 100, "paid": 100, "date": "2024-04-01"}),
                json!({"supplier": "Beta", "invoice": "2", "amount": 200, "paid": 50, "date": "2024-04-10"}),
                json!({"supplier": "alphabet", "invoice": "3", "amount": 50, "paid": 0, "date": "2024-04-20"}),
            ],
        )
    }

    fn suppliers(rows: &[ReportRow]) -> Vec<String> {
        rows.iter()
            .map(|r| match r.get("supplier") {
                Some(CellValue::Text(s)) => s.clone(),
                _ => String::new(),
            })
            .collect()
    }

    #[test]
    fn test_empty_criteria_returns_rows_unchanged() {
        assert_eq!(filter_rows(&spec(), &rows(), &FilterCriteria::new()), rows());
    }

    #[test]
    fn test_contains_is_case_insensitive_and_order_preserving() {
        let c = FilterCriteria::new().with("supplier", Predicate::Contains("ALPHA".into()));
        let out = filter_rows(&spec(), &rows(), &c);
        assert_eq!(suppliers(&out), vec!["Alpha", "alphabet"]);
    }

    #[test]
    fn test_contains_matches_display_text() {
        let c = FilterCriteria::new().with("amount", Predicate::Contains("₹200".into()));
        assert_eq!(suppliers(&filter_rows(&spec(), &rows(), &c)), vec!["Beta"]);
    }

    #[test]
    fn test_numeric_range_open_bounds() {
        let c = FilterCriteria::new().with(
            "amount",
            Predicate::Range {
                min: Some(100.0),
                max: None,
            },
        );
        let out = filter_rows(&spec(), &rows(), &c);
        assert_eq!(suppliers(&out), vec!["Alpha", "Beta"]);

        let totals = aggregate(&spec(), &out);
        assert_eq!(totals.sum("amount"), Some(300.0));
        assert_eq!(totals.count, 2);
    }

    #[test]
    fn test_date_range_inclusive() {
        let c = FilterCriteria::new().with(
            "date",
            Predicate::DateRange {
                from: NaiveDate::from_ymd_opt(2024, 4, 10),
                to: NaiveDate::from_ymd_opt(2024, 4, 20),
            },
        );
        assert_eq!(suppliers(&filter_rows(&spec(), &rows(), &c)), vec!["Beta", "alphabet"]);
    }

    #[test]
    fn test_search_spans_columns() {
        let c = FilterCriteria::new().with_search("3");
        assert_eq!(suppliers(&filter_rows(&spec(), &rows(), &c)), vec!["alphabet"]);
    }

    #[test]
    fn test_unset_predicates_match_all() {
        let mut c = FilterCriteria::new();
        c.set("supplier", Predicate::Contains("  ".into()));
        c.set("amount", Predicate::Range { min: None, max: None });
        assert!(c.is_empty());
        assert_eq!(filter_rows(&spec(), &rows(), &c).len(), 3);
    }

    #[test]
    fn test_totals_follow_filtered_set() {
        let all = rows();
        let c = FilterCriteria::new().with("supplier", Predicate::Contains("beta".into()));
        let filtered = filter_rows(&spec(), &all, &c);
        let totals = aggregate(&spec(), &filtered);

        let expected: f64 = all
            .iter()
            .filter(|r| suppliers(std::slice::from_ref(*r))[0].to_lowercase().contains("beta"))
            .filter_map(|r| r.get("amount").and_then(CellValue::as_number))
            .sum();
        assert_eq!(totals.sum("amount"), Some(expected));
        assert_eq!(totals.sum("paid"), Some(50.0));
    }

    #[test]
    fn test_empty_set_gives_zero_totals() {
        let totals = aggregate(&spec(), &[]);
        assert_eq!(totals.count, 0);
        assert_eq!(totals.sums, vec![("amount".to_string(), 0.0), ("paid".to_string(), 0.0)]);
    }

    #[test]
    fn test_active_count() {
        let c = FilterCriteria::new()
            .with("supplier", Predicate::Contains("a".into()))
            .with_search("x");
        assert_eq!(c.active_count(), 2);
    }
}

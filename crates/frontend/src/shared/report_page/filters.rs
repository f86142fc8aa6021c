//! Raw filter form text -> [`FilterCriteria`] and backend query.
//!
//! Inputs are kept as typed text so a half-typed number never clears what
//! the user entered; anything that does not parse is treated as unset.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use contracts::shared::query::ReportQuery;
use reports::normalize::parse_date;
use reports::{FilterCriteria, Predicate};

use super::definition::{FilterField, ServerParams};

/// Text of one filter's inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub text: String,
    pub min: String,
    pub max: String,
    pub from: String,
    pub to: String,
}

pub type FilterInputs = BTreeMap<&'static str, FilterInput>;

/// Which text box of a [`FilterInput`] an input element edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPart {
    Text,
    Min,
    Max,
    From,
    To,
}

impl InputPart {
    pub fn get(self, input: &FilterInput) -> &str {
        match self {
            InputPart::Text => &input.text,
            InputPart::Min => &input.min,
            InputPart::Max => &input.max,
            InputPart::From => &input.from,
            InputPart::To => &input.to,
        }
    }

    pub fn set(self, input: &mut FilterInput, value: String) {
        let slot = match self {
            InputPart::Text => &mut input.text,
            InputPart::Min => &mut input.min,
            InputPart::Max => &mut input.max,
            InputPart::From => &mut input.from,
            InputPart::To => &mut input.to,
        };
        *slot = value;
    }
}

/// `"₹1,250.50"` -> `1250.5`
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_date_input(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        parse_date(text)
    }
}

fn predicate_for(field: &FilterField, input: &FilterInput) -> Predicate {
    match field {
        FilterField::Contains { .. } => Predicate::Contains(input.text.trim().to_string()),
        FilterField::Range { .. } => Predicate::Range {
            min: parse_amount(&input.min),
            max: parse_amount(&input.max),
        },
        FilterField::DateRange { .. } => Predicate::DateRange {
            from: parse_date_input(&input.from),
            to: parse_date_input(&input.to),
        },
    }
}

pub fn build_criteria(fields: &[FilterField], inputs: &FilterInputs, search: &str) -> FilterCriteria {
    let mut criteria = FilterCriteria::new().with_search(search.trim());
    for field in fields {
        if let Some(input) = inputs.get(field.key()) {
            criteria.set(field.key(), predicate_for(field, input));
        }
    }
    criteria
}

/// Chip text of an active filter, `None` when the filter is unset
pub fn describe(field: &FilterField, input: &FilterInput) -> Option<String> {
    let predicate = predicate_for(field, input);
    if predicate.is_unset() {
        return None;
    }
    let value = match predicate {
        Predicate::Contains(text) => format!("\"{}\"", text),
        Predicate::Range { min, max } => bounds(min.map(fmt_amount), max.map(fmt_amount)),
        Predicate::DateRange { from, to } => bounds(from.map(fmt_date), to.map(fmt_date)),
    };
    Some(format!("{}: {}", field.label(), value))
}

fn fmt_amount(v: f64) -> String {
    reports::format::format_fixed(v, 2)
}

fn fmt_date(d: NaiveDate) -> String {
    d.format("%d-%m-%Y").to_string()
}

fn bounds(low: Option<String>, high: Option<String>) -> String {
    match (low, high) {
        (Some(l), Some(h)) => format!("{} to {}", l, h),
        (Some(l), None) => format!("from {}", l),
        (None, Some(h)) => format!("up to {}", h),
        (None, None) => String::new(),
    }
}

/// Backend query for the current server-side inputs
pub fn build_query(base: &ReportQuery, params: ServerParams, from: &str, to: &str, days: &str) -> ReportQuery {
    let mut query = base.clone();
    match params {
        ServerParams::None => {}
        ServerParams::DateRange => {
            query.from = parse_date_input(from);
            query.to = parse_date_input(to);
        }
        ServerParams::ExpiryWindow { default_days } => {
            query.days = Some(
                days.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|d| *d > 0)
                    .unwrap_or(default_days),
            );
        }
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::query::AssociateType;

    fn fields() -> Vec<FilterField> {
        vec![
            FilterField::Contains { key: "supplier", label: "Supplier" },
            FilterField::Range { key: "amount", label: "Amount" },
            FilterField::DateRange { key: "date", label: "Date" },
        ]
    }

    #[test]
    fn test_input_parts() {
        let mut input = FilterInput::default();
        InputPart::Max.set(&mut input, "500".into());
        InputPart::From.set(&mut input, "2024-04-01".into());
        assert_eq!(InputPart::Max.get(&input), "500");
        assert_eq!(InputPart::From.get(&input), "2024-04-01");
        assert_eq!(InputPart::Min.get(&input), "");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("₹1,250.50"), Some(1250.5));
        assert_eq!(parse_amount(" 100 "), Some(100.0));
        assert_eq!(parse_amount("-"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_empty_inputs_build_empty_criteria() {
        let mut inputs = FilterInputs::new();
        inputs.insert("supplier", FilterInput::default());
        inputs.insert("amount", FilterInput { min: "x".into(), ..Default::default() });
        let criteria = build_criteria(&fields(), &inputs, "  ");
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_inputs_become_predicates() {
        let mut inputs = FilterInputs::new();
        inputs.insert("supplier", FilterInput { text: " alpha ".into(), ..Default::default() });
        inputs.insert("amount", FilterInput { min: "100".into(), ..Default::default() });
        inputs.insert(
            "date",
            FilterInput { from: "2024-04-01".into(), to: "2024-04-30".into(), ..Default::default() },
        );
        let criteria = build_criteria(&fields(), &inputs, "dolo");

        assert_eq!(criteria.active_count(), 4);
        assert_eq!(criteria.predicates["supplier"], Predicate::Contains("alpha".into()));
        assert_eq!(criteria.predicates["amount"], Predicate::Range { min: Some(100.0), max: None });
        assert_eq!(
            criteria.predicates["date"],
            Predicate::DateRange {
                from: NaiveDate::from_ymd_opt(2024, 4, 1),
                to: NaiveDate::from_ymd_opt(2024, 4, 30),
            }
        );
        assert_eq!(criteria.search, "dolo");
    }

    #[test]
    fn test_describe() {
        let f = fields();
        let text = FilterInput { text: "alpha".into(), ..Default::default() };
        assert_eq!(describe(&f[0], &text).as_deref(), Some("Supplier: \"alpha\""));

        let range = FilterInput { min: "100".into(), max: "500".into(), ..Default::default() };
        assert_eq!(describe(&f[1], &range).as_deref(), Some("Amount: 100.00 to 500.00"));

        let upper = FilterInput { to: "2024-04-30".into(), ..Default::default() };
        assert_eq!(describe(&f[2], &upper).as_deref(), Some("Date: up to 30-04-2024"));

        assert_eq!(describe(&f[1], &FilterInput::default()), None);
    }

    #[test]
    fn test_build_query() {
        let base = ReportQuery::associates(AssociateType::Supplier);
        assert_eq!(build_query(&base, ServerParams::None, "2024-01-01", "", ""), base);

        let q = build_query(&ReportQuery::default(), ServerParams::DateRange, "2024-04-01", "", "");
        assert_eq!(q.from, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(q.to, None);

        let window = ServerParams::ExpiryWindow { default_days: 90 };
        assert_eq!(build_query(&ReportQuery::default(), window, "", "", "30").days, Some(30));
        assert_eq!(build_query(&ReportQuery::default(), window, "", "", "0").days, Some(90));
        assert_eq!(build_query(&ReportQuery::default(), window, "", "", "").days, Some(90));
    }
}

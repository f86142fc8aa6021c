//! Raw backend objects -> fully-defaulted [`ReportRow`]s.
//!
//! Backend payloads are treated as opaque and possibly incomplete. A
//! column that cannot be read falls back to its default (`0` for numeric
//! columns, `"N/A"` for everything else); normalization never fails.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::model::{CellValue, ColumnKind, ColumnSpec, ReportRow, ReportSpec, MISSING_TEXT};

pub fn normalize_rows(spec: &ReportSpec, raw: &[Value]) -> Vec<ReportRow> {
    raw.iter().map(|item| normalize_row(&spec.columns, item)).collect()
}

/// Project one backend object onto `columns`. Every column key is present
/// in the result, in column order.
pub fn normalize_row(columns: &[ColumnSpec], item: &Value) -> ReportRow {
    let mut row = ReportRow::with_capacity(columns.len());
    for col in columns {
        let raw = lookup(item, &col.source);
        row.insert(&col.key, normalize_cell(col, raw));
    }
    row.id = record_id(item);
    row
}

/// `id` of the backend object, string or integer
fn record_id(item: &Value) -> Option<String> {
    match item.get("id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(item, |node, segment| node.get(segment))
        .filter(|v| !v.is_null())
}

fn normalize_cell(col: &ColumnSpec, raw: Option<&Value>) -> CellValue {
    match col.kind {
        ColumnKind::Money | ColumnKind::Number { .. } | ColumnKind::Integer => {
            CellValue::Number(raw.and_then(|v| number_of(v, &col.key)).unwrap_or(0.0))
        }
        ColumnKind::Date => match raw {
            Some(Value::String(s)) => parse_date(s)
                .map(CellValue::Date)
                .unwrap_or_else(|| text_or_missing(s)),
            Some(other) => text_cell(other),
            None => missing(),
        },
        ColumnKind::List(join) => match raw {
            Some(Value::Array(items)) => {
                let parts: Vec<String> = items.iter().filter_map(list_item_text).collect();
                if parts.is_empty() {
                    missing()
                } else {
                    CellValue::Text(parts.join(join.separator()))
                }
            }
            Some(other) => text_cell(other),
            None => missing(),
        },
        ColumnKind::Text => raw.map(text_cell).unwrap_or_else(missing),
    }
}

fn missing() -> CellValue {
    CellValue::Text(MISSING_TEXT.to_string())
}

fn text_or_missing(s: &str) -> CellValue {
    if s.trim().is_empty() {
        missing()
    } else {
        CellValue::Text(s.to_string())
    }
}

fn text_cell(value: &Value) -> CellValue {
    match value {
        Value::String(s) => text_or_missing(s),
        Value::Number(n) => CellValue::Text(n.to_string()),
        Value::Bool(b) => CellValue::Text(if *b { "Yes" } else { "No" }.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(list_item_text).collect();
            if parts.is_empty() {
                missing()
            } else {
                CellValue::Text(parts.join(", "))
            }
        }
        Value::Object(_) => match list_item_text(value) {
            Some(name) => CellValue::Text(name),
            None => missing(),
        },
        Value::Null => missing(),
    }
}

/// Display text of one array element: scalars as-is, objects by their
/// `name` field
fn list_item_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
        _ => None,
    }
}

fn number_of(value: &Value, key: &str) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            if cleaned.is_empty() {
                return None;
            }
            match cleaned.parse::<f64>() {
                Ok(n) if n.is_finite() => Some(n),
                _ => {
                    log::warn!("column '{}': '{}' is not a number, using 0", key, s);
                    None
                }
            }
        }
        _ => None,
    }
}

/// `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListJoin;
    use serde_json::json;

    fn spec() -> ReportSpec {
        ReportSpec::new("Suppliers", "suppliers")
            .column(ColumnSpec::text("Supplier", "supplier").from_path("supplier.name"))
            .column(ColumnSpec::text("Invoice", "invoice"))
            .column(ColumnSpec::money("Amount", "amount"))
            .column(ColumnSpec::integer("Qty", "qty"))
            .column(ColumnSpec::date("Date", "date"))
            .column(ColumnSpec::list("Brands", "brands", ListJoin::Newline))
    }

    #[test]
    fn test_record_id_is_kept() {
        let rows = normalize_rows(
            &spec(),
            &[json!({"id": 42}), json!({"id": " 7a "}), json!({"id": null}), json!({})],
        );
        let ids: Vec<Option<&str>> = rows.iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("42"), Some("7a"), None, None]);
        assert_eq!(rows[0].len(), spec().columns.len());
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let rows = normalize_rows(&spec(), &[json!({})]);
        let row = &rows[0];
        assert_eq!(row.len(), 6);
        assert_eq!(row.get("supplier"), Some(&CellValue::Text("N/A".into())));
        assert_eq!(row.get("invoice"), Some(&CellValue::Text("N/A".into())));
        assert_eq!(row.get("amount"), Some(&CellValue::Number(0.0)));
        assert_eq!(row.get("qty"), Some(&CellValue::Number(0.0)));
        assert_eq!(row.get("date"), Some(&CellValue::Text("N/A".into())));
        assert_eq!(row.get("brands"), Some(&CellValue::Text("N/A".into())));
    }

    #[test]
    fn test_null_and_malformed_values_default() {
        let rows = normalize_rows(
            &spec(),
            &[json!({"supplier": null, "invoice": "", "amount": "abc", "qty": {"x": 1}})],
        );
        let row = &rows[0];
        assert_eq!(row.get("supplier"), Some(&CellValue::Text("N/A".into())));
        assert_eq!(row.get("invoice"), Some(&CellValue::Text("N/A".into())));
        assert_eq!(row.get("amount"), Some(&CellValue::Number(0.0)));
        assert_eq!(row.get("qty"), Some(&CellValue::Number(0.0)));
    }

    #[test]
    fn test_keys_follow_column_order() {
        let rows = normalize_rows(&spec(), &[json!({"brands": [], "amount": 1, "invoice": 7})]);
        let keys: Vec<_> = rows[0].keys().collect();
        assert_eq!(keys, vec!["supplier", "invoice", "amount", "qty", "date", "brands"]);
    }

    #[test]
    fn test_values_are_projected() {
        let rows = normalize_rows(
            &spec(),
            &[json!({
                "supplier": {"name": "Alpha Pharma"},
                "invoice": 1,
                "amount": "1,250.75",
                "qty": 3,
                "date": "2024-03-15T14:02:26Z",
                "brands": [{"name": "Crocin"}, "Dolo", {"id": 4}]
            })],
        );
        let row = &rows[0];
        assert_eq!(row.get("supplier"), Some(&CellValue::Text("Alpha Pharma".into())));
        assert_eq!(row.get("invoice"), Some(&CellValue::Text("1".into())));
        assert_eq!(row.get("amount"), Some(&CellValue::Number(1250.75)));
        assert_eq!(row.get("qty"), Some(&CellValue::Number(3.0)));
        assert_eq!(
            row.get("date"),
            Some(&CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()))
        );
        assert_eq!(row.get("brands"), Some(&CellValue::Text("Crocin\nDolo".into())));
    }

    #[test]
    fn test_unparseable_date_kept_as_text() {
        let rows = normalize_rows(&spec(), &[json!({"date": "next week"})]);
        assert_eq!(rows[0].get("date"), Some(&CellValue::Text("next week".into())));
    }

    #[test]
    fn test_parse_date() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(parse_date("2024-12-31"), Some(d));
        assert_eq!(parse_date("2024-12-31T23:59:59+05:30"), Some(d));
        assert_eq!(parse_date("2024-12-31 10:00:00"), Some(d));
        assert_eq!(parse_date("31/12/2024"), None);
    }
}

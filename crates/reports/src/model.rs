use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format::{format_currency, format_fixed, DisplayFormat};

/// Text shown for a string field the backend left out
pub const MISSING_TEXT: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Empty,
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// How an array-valued source field collapses into one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListJoin {
    Newline,
    Comma,
}

impl ListJoin {
    pub fn separator(&self) -> &'static str {
        match self {
            ListJoin::Newline => "\n",
            ListJoin::Comma => ", ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Money,
    Number { decimals: u8 },
    Integer,
    Date,
    List(ListJoin),
}

impl ColumnKind {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnKind::Money | ColumnKind::Number { .. } | ColumnKind::Integer
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Header shown on screen and in every export
    pub label: String,
    /// Key of the cell in [`ReportRow`]
    pub key: String,
    /// Dotted path into the raw backend object, e.g. `supplier.name`
    pub source: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(label: &str, key: &str, kind: ColumnKind) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
            source: key.to_string(),
            kind,
        }
    }

    pub fn text(label: &str, key: &str) -> Self {
        Self::new(label, key, ColumnKind::Text)
    }

    pub fn money(label: &str, key: &str) -> Self {
        Self::new(label, key, ColumnKind::Money)
    }

    pub fn integer(label: &str, key: &str) -> Self {
        Self::new(label, key, ColumnKind::Integer)
    }

    pub fn number(label: &str, key: &str, decimals: u8) -> Self {
        Self::new(label, key, ColumnKind::Number { decimals })
    }

    pub fn date(label: &str, key: &str) -> Self {
        Self::new(label, key, ColumnKind::Date)
    }

    pub fn list(label: &str, key: &str, join: ListJoin) -> Self {
        Self::new(label, key, ColumnKind::List(join))
    }

    /// Read the value from a different (possibly nested) source path
    pub fn from_path(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn display(&self, value: &CellValue, format: &DisplayFormat) -> String {
        match value {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => match self.kind {
                ColumnKind::Money => format_currency(*n, &format.currency),
                ColumnKind::Number { decimals } => format_fixed(*n, decimals),
                ColumnKind::Integer => format_fixed(*n, 0),
                _ => n.to_string(),
            },
            CellValue::Date(d) => d.format(&format.date_format).to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

/// One normalized display record: column key -> value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    cells: Vec<(String, CellValue)>,
    /// Backend id of the source record, for row actions. Never displayed.
    #[serde(default)]
    pub id: Option<String>,
}

impl ReportRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            cells: Vec::with_capacity(n),
            id: None,
        }
    }

    /// Set a cell, replacing any previous value under the same key
    pub fn insert(&mut self, key: &str, value: CellValue) {
        match self.cells.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.cells.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Sums over the currently filtered rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub count: usize,
    /// (column key, sum) in the report's total-column order
    pub sums: Vec<(String, f64)>,
}

impl SummaryTotals {
    pub fn sum(&self, key: &str) -> Option<f64> {
        self.sums.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }
}

/// Everything needed to render a report: title, columns and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSpec {
    pub title: String,
    /// Base name of CSV downloads, e.g. `payables`
    pub file_stem: String,
    pub columns: Vec<ColumnSpec>,
    /// Header of the 1-based serial column, rendered in front of `columns`
    pub serial_label: Option<String>,
    /// Keys of numeric columns summed in the summary
    pub total_keys: Vec<String>,
    pub format: DisplayFormat,
}

impl ReportSpec {
    pub fn new(title: &str, file_stem: &str) -> Self {
        Self {
            title: title.to_string(),
            file_stem: file_stem.to_string(),
            columns: Vec::new(),
            serial_label: None,
            total_keys: Vec::new(),
            format: DisplayFormat::default(),
        }
    }

    pub fn serial(mut self, label: &str) -> Self {
        self.serial_label = Some(label.to_string());
        self
    }

    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Include a numeric column in the summary totals.
    /// Keys that are not numeric columns are ignored with a warning.
    pub fn total(mut self, key: &str) -> Self {
        let numeric = self
            .column_by_key(key)
            .map(|c| c.kind.is_numeric())
            .unwrap_or(false);
        if numeric {
            self.total_keys.push(key.to_string());
        } else {
            log::warn!("report '{}': '{}' is not a numeric column, not totalled", self.title, key);
        }
        self
    }

    pub fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn column_by_key(&self, key: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Header labels in display order, serial column first
    pub fn header_labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(self.columns.len() + 1);
        if let Some(serial) = &self.serial_label {
            labels.push(serial.clone());
        }
        labels.extend(self.columns.iter().map(|c| c.label.clone()));
        labels
    }

    /// Display text of a row at `index` (0-based position in the shown set)
    pub fn display_row(&self, index: usize, row: &ReportRow) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.columns.len() + 1);
        if self.serial_label.is_some() {
            cells.push((index + 1).to_string());
        }
        for col in &self.columns {
            let text = row
                .get(&col.key)
                .map(|v| col.display(v, &self.format))
                .unwrap_or_default();
            cells.push(text);
        }
        cells
    }

    /// Offset of `columns[i]` in a displayed row
    pub fn display_offset(&self) -> usize {
        usize::from(self.serial_label.is_some())
    }

    /// Cells of a totals row in display order: each sum under its column and
    /// `label` in the first cell left free. When every cell holds a sum the
    /// label is prefixed to the first one.
    pub fn total_cells(&self, totals: &SummaryTotals, label: &str) -> Vec<String> {
        let offset = self.display_offset();
        let mut cells = vec![String::new(); self.columns.len() + offset];
        for (key, sum) in &totals.sums {
            if let Some(i) = self.columns.iter().position(|c| &c.key == key) {
                cells[i + offset] = self.columns[i].display(&CellValue::Number(*sum), &self.format);
            }
        }
        match cells.iter_mut().find(|c| c.is_empty()) {
            Some(free) => *free = label.to_string(),
            None => {
                if let Some(first) = cells.first_mut() {
                    *first = format!("{} {}", label, first);
                }
            }
        }
        cells
    }

    /// Label/value pairs appended under a table: record count, then one
    /// line per totalled column
    pub fn summary_lines(&self, totals: &SummaryTotals) -> Vec<(String, String)> {
        let mut lines = vec![("Records".to_string(), totals.count.to_string())];
        for (key, sum) in &totals.sums {
            if let Some(col) = self.column_by_key(key) {
                lines.push((
                    format!("Total {}", col.label),
                    col.display(&CellValue::Number(*sum), &self.format),
                ));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ReportSpec {
        ReportSpec::new("Payables", "payables")
            .serial("Sr.No")
            .column(ColumnSpec::text("Supplier", "supplier"))
            .column(ColumnSpec::money("Amount", "amount"))
            .column(ColumnSpec::date("Due", "due_date"))
            .total("amount")
            .total("supplier")
    }

    #[test]
    fn test_header_labels_include_serial() {
        assert_eq!(spec().header_labels(), vec!["Sr.No", "Supplier", "Amount", "Due"]);
        assert_eq!(spec().display_offset(), 1);
    }

    #[test]
    fn test_only_numeric_columns_are_totalled() {
        assert_eq!(spec().total_keys, vec!["amount"]);
    }

    #[test]
    fn test_display_row() {
        let mut row = ReportRow::new();
        row.insert("supplier", CellValue::Text("Alpha".into()));
        row.insert("amount", CellValue::Number(500.5));
        row.insert("due_date", CellValue::Date(NaiveDate::from_ymd_opt(2024, 4, 9).unwrap()));
        assert_eq!(spec().display_row(2, &row), vec!["3", "Alpha", "₹500.50", "09-04-2024"]);
    }

    #[test]
    fn test_text_cell_is_not_reformatted() {
        let col = ColumnSpec::money("Amount", "amount");
        let fmt = DisplayFormat::default();
        let once = col.display(&CellValue::Number(500.5), &fmt);
        assert_eq!(col.display(&CellValue::Text(once.clone()), &fmt), once);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut row = ReportRow::new();
        row.insert("a", CellValue::Number(1.0));
        row.insert("b", CellValue::Empty);
        row.insert("a", CellValue::Number(2.0));
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(row.get("a"), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn test_total_cells_label_after_serial() {
        let totals = SummaryTotals {
            count: 2,
            sums: vec![("amount".into(), 700.5)],
        };
        assert_eq!(spec().total_cells(&totals, "Total"), vec!["Total", "", "₹700.50", ""]);
    }

    #[test]
    fn test_total_cells_label_never_overwrites_a_sum() {
        let spec = ReportSpec::new("Stock", "stock")
            .column(ColumnSpec::money("Value", "value"))
            .column(ColumnSpec::text("Drug", "name"))
            .total("value");
        let totals = SummaryTotals {
            count: 3,
            sums: vec![("value".into(), 30.0)],
        };
        assert_eq!(spec.total_cells(&totals, "Total"), vec!["₹30.00", "Total"]);

        let all_summed = ReportSpec::new("Cash", "cash")
            .column(ColumnSpec::money("Value", "value"))
            .total("value");
        assert_eq!(all_summed.total_cells(&totals, "Total"), vec!["Total ₹30.00"]);
    }

    #[test]
    fn test_summary_lines() {
        let totals = SummaryTotals {
            count: 2,
            sums: vec![("amount".into(), 700.5)],
        };
        assert_eq!(
            spec().summary_lines(&totals),
            vec![
                ("Records".to_string(), "2".to_string()),
                ("Total Amount".to_string(), "₹700.50".to_string()),
            ]
        );
    }
}

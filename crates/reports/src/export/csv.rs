use crate::export::ExportError;
use crate::model::{ReportRow, ReportSpec};

/// Header line plus one line per row, joined by `\n` with no trailing
/// newline. Fields containing a comma, quote or line break are quoted
/// per RFC 4180.
pub fn encode_csv(spec: &ReportSpec, rows: &[ReportRow]) -> Result<String, ExportError> {
    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .quote_style(::csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(spec.header_labels())
        .map_err(|e| ExportError::Csv(e.to_string()))?;

    for (index, row) in rows.iter().enumerate() {
        writer
            .write_record(spec.display_row(index, row))
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_rows, FilterCriteria, Predicate};
    use crate::model::{ColumnSpec, ListJoin};
    use crate::normalize::normalize_rows;
    use serde_json::json;

    fn payables() -> ReportSpec {
        ReportSpec::new("Payables", "payables")
            .serial("Sr.No")
            .column(ColumnSpec::text("Supplier", "supplier"))
            .column(ColumnSpec::text("Invoice", "invoice"))
            .column(ColumnSpec::money("Amount", "amount"))
            .column(ColumnSpec::money("Paid", "paid"))
    }

    #[test]
    fn test_filtered_supplier_export() {
        let spec = payables();
        let rows = normalize_rows(
            &spec,
            &[
                json!({"supplier": "Alpha", "invoice": "1", "amount": 500.5, "paid": 200}),
                json!({"supplier": "Beta", "invoice": "2", "amount": 300, "paid": 300}),
            ],
        );
        let criteria = FilterCriteria::new().with("supplier", Predicate::Contains("alpha".into()));
        let filtered = filter_rows(&spec, &rows, &criteria);
        assert_eq!(filtered.len(), 1);

        assert_eq!(
            encode_csv(&spec, &filtered).unwrap(),
            "Sr.No,Supplier,Invoice,Amount,Paid\n1,Alpha,1,₹500.50,₹200.00"
        );
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let spec = ReportSpec::new("Suppliers", "suppliers")
            .column(ColumnSpec::text("Supplier", "name"))
            .column(ColumnSpec::list("Brands", "brands", ListJoin::Comma))
            .column(ColumnSpec::text("Note", "note"));
        let rows = normalize_rows(
            &spec,
            &[json!({"name": "Sun, Pharma", "brands": ["A", "B"], "note": "say \"hi\""})],
        );
        assert_eq!(
            encode_csv(&spec, &rows).unwrap(),
            "Supplier,Brands,Note\n\"Sun, Pharma\",\"A, B\",\"say \"\"hi\"\"\""
        );
    }

    #[test]
    fn test_serial_numbers_follow_shown_rows() {
        let spec = payables();
        let rows = normalize_rows(
            &spec,
            &[json!({"supplier": "A"}), json!({"supplier": "B"}), json!({"supplier": "C"})],
        );
        let csv = encode_csv(&spec, &rows[1..]).unwrap();
        let serials: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap_or(""))
            .collect();
        assert_eq!(serials, vec!["1", "2"]);
        assert!(csv.lines().nth(1).unwrap().ends_with("₹0.00,₹0.00"));
    }
}

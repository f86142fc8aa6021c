//! Export encoders: CSV, XLSX and PDF.
//!
//! All three are pure functions of `(spec, rows, totals)` and read headers
//! and cells through [`ReportSpec::header_labels`] and
//! [`ReportSpec::display_row`].

pub mod csv;
pub mod pdf;
pub mod xlsx;

use chrono::NaiveDate;
use contracts::shared::business_info::BusinessInfo;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ReportRow, ReportSpec, SummaryTotals};
pub use pdf::PdfFont;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("No data to export")]
    EmptyReport,

    #[error("Failed to build CSV: {0}")]
    Csv(String),

    #[error("Failed to build spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("Failed to build PDF: {0}")]
    Pdf(String),

    #[error("Failed to start download: {0}")]
    Download(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Xlsx, ExportFormat::Pdf];

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel",
            ExportFormat::Pdf => "PDF",
        }
    }

    /// `payables.csv`, `Supplier_Payables_2024-04-09.xlsx`
    pub fn file_name(&self, spec: &ReportSpec, generated_on: NaiveDate) -> String {
        match self {
            ExportFormat::Csv => format!("{}.csv", spec.file_stem),
            _ => format!(
                "{}_{}.{}",
                title_stem(&spec.title),
                generated_on.format("%Y-%m-%d"),
                self.extension()
            ),
        }
    }
}

/// `"Low Stock / Reorder"` -> `"Low_Stock_Reorder"`
fn title_stem(title: &str) -> String {
    let words: Vec<String> = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        "Report".to_string()
    } else {
        words.join("_")
    }
}

/// Presentation details that are not part of the row data
#[derive(Debug, Clone, Default)]
pub struct DocumentMeta {
    pub business: BusinessInfo,
    pub generated_on: NaiveDate,
    /// Labels printed under signature lines at the end of a PDF
    pub signatures: Vec<String>,
    /// TrueType faces for PDF text. Without them the built-in Helvetica is
    /// used and characters outside Latin-1 are transliterated (`₹` -> `Rs.`).
    pub font: Option<PdfFont>,
    /// Worksheet name; the report title when unset
    pub sheet_name: Option<String>,
}

impl DocumentMeta {
    pub fn new(business: BusinessInfo, generated_on: NaiveDate) -> Self {
        Self {
            business,
            generated_on,
            ..Default::default()
        }
    }
}

/// Downloadable result of one export action
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

pub fn encode(
    format: ExportFormat,
    spec: &ReportSpec,
    rows: &[ReportRow],
    totals: Option<&SummaryTotals>,
    meta: &DocumentMeta,
) -> Result<ExportArtifact, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::EmptyReport);
    }

    let bytes = match format {
        ExportFormat::Csv => csv::encode_csv(spec, rows)?.into_bytes(),
        ExportFormat::Xlsx => {
            let sheet = meta.sheet_name.as_deref().unwrap_or(&spec.title);
            xlsx::encode_xlsx(spec, rows, totals, sheet)?
        }
        ExportFormat::Pdf => pdf::encode_pdf(spec, rows, totals, meta)?,
    };

    log::debug!(
        "exported '{}' as {}: {} rows, {} bytes",
        spec.title,
        format.label(),
        rows.len(),
        bytes.len()
    );

    Ok(ExportArtifact {
        filename: format.file_name(spec, meta.generated_on),
        mime: format.mime(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnSpec;
    use crate::normalize::normalize_rows;
    use serde_json::json;

    fn spec() -> ReportSpec {
        ReportSpec::new("Low Stock / Reorder", "low_stock")
            .column(ColumnSpec::text("Drug", "name"))
            .column(ColumnSpec::integer("Qty", "qty"))
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 9).unwrap()
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ExportFormat::Csv.file_name(&spec(), date()), "low_stock.csv");
        assert_eq!(
            ExportFormat::Xlsx.file_name(&spec(), date()),
            "Low_Stock_Reorder_2024-04-09.xlsx"
        );
        assert_eq!(
            ExportFormat::Pdf.file_name(&spec(), date()),
            "Low_Stock_Reorder_2024-04-09.pdf"
        );
        assert_eq!(title_stem("  "), "Report");
    }

    #[test]
    fn test_empty_report_is_rejected() {
        let meta = DocumentMeta::new(BusinessInfo::default(), date());
        for format in ExportFormat::ALL {
            assert_eq!(encode(format, &spec(), &[], None, &meta), Err(ExportError::EmptyReport));
        }
    }

    #[test]
    fn test_artifact_carries_name_and_mime() {
        let rows = normalize_rows(&spec(), &[json!({"name": "Dolo 650", "qty": 4})]);
        let meta = DocumentMeta::new(BusinessInfo::default(), date());
        let artifact = encode(ExportFormat::Xlsx, &spec(), &rows, None, &meta).unwrap();
        assert_eq!(artifact.filename, "Low_Stock_Reorder_2024-04-09.xlsx");
        assert_eq!(
            artifact.mime,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert!(artifact.bytes.starts_with(b"PK"));
    }
}

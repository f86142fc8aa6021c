//! Report row projection and export.
//!
//! Raw backend objects are normalized into [`ReportRow`]s according to a
//! [`ReportSpec`], filtered and totalled client side, and exported as CSV,
//! XLSX or PDF. Every export surface renders headers and cells through the
//! same projection ([`ReportSpec::header_labels`], [`ReportSpec::display_row`]).

pub mod download;
pub mod export;
pub mod filter;
pub mod format;
pub mod model;
pub mod normalize;

pub use download::{export_and_download, trigger_download, DownloadTarget, ExportPhase, ExportSession};
pub use export::{encode, DocumentMeta, ExportArtifact, ExportError, ExportFormat, PdfFont};
pub use filter::{aggregate, filter_rows, FilterCriteria, Predicate};
pub use format::{format_currency, DisplayFormat};
pub use model::{CellValue, ColumnKind, ColumnSpec, ListJoin, ReportRow, ReportSpec, SummaryTotals};
pub use normalize::normalize_rows;

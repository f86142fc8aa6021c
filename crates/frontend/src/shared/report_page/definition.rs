use std::future::Future;
use std::pin::Pin;

use contracts::shared::api_error::FetchError;
use contracts::shared::query::ReportQuery;
use reports::{ExportFormat, ReportSpec};
use serde_json::Value;
use web_sys::AbortSignal;

use crate::shared::page_meta::PageMeta;

pub type RowsFuture = Pin<Box<dyn Future<Output = Result<Vec<Value>, FetchError>>>>;

/// Fetcher of a report's raw records
pub type FetchRows = fn(ReportQuery, Option<AbortSignal>) -> RowsFuture;

pub type DeleteFuture = Pin<Box<dyn Future<Output = Result<(), FetchError>>>>;

/// A client-side filter input bound to one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Contains { key: &'static str, label: &'static str },
    Range { key: &'static str, label: &'static str },
    DateRange { key: &'static str, label: &'static str },
}

impl FilterField {
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::Contains { key, .. }
            | FilterField::Range { key, .. }
            | FilterField::DateRange { key, .. } => key,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Contains { label, .. }
            | FilterField::Range { label, .. }
            | FilterField::DateRange { label, .. } => label,
        }
    }
}

/// Parameters sent to the backend with the fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerParams {
    None,
    /// `from` / `to` dates
    DateRange,
    /// `days` ahead for expiry reports
    ExpiryWindow { default_days: u32 },
}

/// Row deletion against the backend
#[derive(Clone, Copy)]
pub struct DeleteRow {
    /// Column whose text names the row in the confirmation
    pub name_key: &'static str,
    pub run: fn(String) -> DeleteFuture,
}

/// Everything that distinguishes one report page from another
#[derive(Clone)]
pub struct ReportDefinition {
    /// Tab key, also the page id prefix
    pub page_id: &'static str,
    pub meta: PageMeta,
    pub spec: ReportSpec,
    pub fetch: FetchRows,
    /// Fixed query part, e.g. the associate type
    pub base_query: ReportQuery,
    pub server_params: ServerParams,
    pub filters: Vec<FilterField>,
    pub formats: Vec<ExportFormat>,
    pub delete: Option<DeleteRow>,
    /// Name under `reports/{name}/excel/` for the server-built workbook
    pub server_excel: Option<&'static str>,
}

impl ReportDefinition {
    pub fn new(page_id: &'static str, meta: PageMeta, spec: ReportSpec, fetch: FetchRows) -> Self {
        Self {
            page_id,
            meta,
            spec,
            fetch,
            base_query: ReportQuery::default(),
            server_params: ServerParams::None,
            filters: Vec::new(),
            formats: ExportFormat::ALL.to_vec(),
            delete: None,
            server_excel: None,
        }
    }

    pub fn query(mut self, query: ReportQuery) -> Self {
        self.base_query = query;
        self
    }

    pub fn date_range(mut self) -> Self {
        self.server_params = ServerParams::DateRange;
        self
    }

    pub fn expiry_window(mut self, default_days: u32) -> Self {
        self.server_params = ServerParams::ExpiryWindow { default_days };
        self
    }

    pub fn contains(mut self, key: &'static str, label: &'static str) -> Self {
        self.filters.push(FilterField::Contains { key, label });
        self
    }

    pub fn range(mut self, key: &'static str, label: &'static str) -> Self {
        self.filters.push(FilterField::Range { key, label });
        self
    }

    pub fn dates(mut self, key: &'static str, label: &'static str) -> Self {
        self.filters.push(FilterField::DateRange { key, label });
        self
    }

    pub fn formats(mut self, formats: &[ExportFormat]) -> Self {
        self.formats = formats.to_vec();
        self
    }

    pub fn deletable(mut self, name_key: &'static str, run: fn(String) -> DeleteFuture) -> Self {
        self.delete = Some(DeleteRow { name_key, run });
        self
    }

    pub fn server_excel(mut self, name: &'static str) -> Self {
        self.server_excel = Some(name);
        self
    }

    /// Filter fields whose key is not a column of the report
    pub fn unknown_filter_keys(&self) -> Vec<&'static str> {
        self.filters
            .iter()
            .map(FilterField::key)
            .filter(|key| self.spec.column_by_key(key).is_none())
            .collect()
    }
}

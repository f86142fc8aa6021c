//! Export action protocol: encode, hand the artifact to the browser, clean up.
//!
//! The browser side (blob, object URL, hidden anchor) sits behind
//! [`DownloadTarget`]; [`trigger_download`] owns the ordering and the
//! cleanup so every implementation gets the same guarantees.

use crate::export::{encode, DocumentMeta, ExportArtifact, ExportError, ExportFormat};
use crate::model::{ReportRow, ReportSpec, SummaryTotals};

/// Where an artifact is saved.
///
/// In the browser this is the document: an object URL for a blob plus a
/// temporary `<a download>` element.
pub trait DownloadTarget {
    type Anchor;

    fn create_object_url(&mut self, artifact: &ExportArtifact) -> Result<String, ExportError>;

    fn attach_anchor(&mut self, url: &str, filename: &str) -> Result<Self::Anchor, ExportError>;

    fn click(&mut self, anchor: &Self::Anchor);

    fn detach_anchor(&mut self, anchor: Self::Anchor) -> Result<(), ExportError>;

    fn revoke_object_url(&mut self, url: &str);
}

/// Push `artifact` to the download mechanism.
///
/// Once an object URL has been created it is always revoked, and an
/// attached anchor is always detached, whichever step fails.
pub fn trigger_download<T: DownloadTarget>(
    target: &mut T,
    artifact: &ExportArtifact,
) -> Result<(), ExportError> {
    let url = target.create_object_url(artifact)?;

    let result = match target.attach_anchor(&url, &artifact.filename) {
        Ok(anchor) => {
            target.click(&anchor);
            target.detach_anchor(anchor)
        }
        Err(e) => Err(e),
    };

    target.revoke_object_url(&url);
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPhase {
    #[default]
    Idle,
    Encoding,
    Triggering,
}

impl ExportPhase {
    /// Drives the "downloading" flag of export buttons
    pub fn is_busy(&self) -> bool {
        !matches!(self, ExportPhase::Idle)
    }
}

/// One export action. Reports `Encoding` on start and `Idle` when dropped,
/// so the busy flag is cleared on every exit path.
pub struct ExportSession<F: FnMut(ExportPhase)> {
    report: F,
}

impl<F: FnMut(ExportPhase)> ExportSession<F> {
    pub fn start(mut report: F) -> Self {
        report(ExportPhase::Encoding);
        Self { report }
    }

    pub fn triggering(&mut self) {
        (self.report)(ExportPhase::Triggering);
    }
}

impl<F: FnMut(ExportPhase)> Drop for ExportSession<F> {
    fn drop(&mut self) {
        (self.report)(ExportPhase::Idle);
    }
}

/// Full export action: `Idle -> Encoding -> Triggering -> Idle`.
#[allow(clippy::too_many_arguments)]
pub fn export_and_download<T, F>(
    target: &mut T,
    on_phase: F,
    format: ExportFormat,
    spec: &ReportSpec,
    rows: &[ReportRow],
    totals: Option<&SummaryTotals>,
    meta: &DocumentMeta,
) -> Result<(), ExportError>
where
    T: DownloadTarget,
    F: FnMut(ExportPhase),
{
    let mut session = ExportSession::start(on_phase);
    let artifact = encode(format, spec, rows, totals, meta)?;
    session.triggering();
    let result = trigger_download(target, &artifact);
    if let Err(e) = &result {
        log::warn!("download of '{}' failed: {}", artifact.filename, e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnSpec;
    use crate::normalize::normalize_rows;
    use chrono::NaiveDate;
    use contracts::shared::business_info::BusinessInfo;
    use serde_json::json;
    use std::cell::RefCell;

    /// Records what a browser document would hold
    #[derive(Default)]
    struct FakeDocument {
        live_urls: Vec<String>,
        anchors: Vec<u32>,
        clicked: Vec<(String, String)>,
        next_id: u32,
        fail_attach: bool,
        fail_detach: bool,
        pending: Vec<(u32, String, String)>,
    }

    impl DownloadTarget for FakeDocument {
        type Anchor = u32;

        fn create_object_url(&mut self, artifact: &ExportArtifact) -> Result<String, ExportError> {
            let url = format!("blob:{}", artifact.filename);
            self.live_urls.push(url.clone());
            Ok(url)
        }

        fn attach_anchor(&mut self, url: &str, filename: &str) -> Result<u32, ExportError> {
            if self.fail_attach {
                return Err(ExportError::Download("no body".into()));
            }
            self.next_id += 1;
            self.anchors.push(self.next_id);
            self.pending.push((self.next_id, url.to_string(), filename.to_string()));
            Ok(self.next_id)
        }

        fn click(&mut self, anchor: &u32) {
            if let Some((_, url, name)) = self.pending.iter().find(|(id, _, _)| id == anchor) {
                self.clicked.push((url.clone(), name.clone()));
            }
        }

        fn detach_anchor(&mut self, anchor: u32) -> Result<(), ExportError> {
            if self.fail_detach {
                return Err(ExportError::Download("detach".into()));
            }
            self.anchors.retain(|a| *a != anchor);
            Ok(())
        }

        fn revoke_object_url(&mut self, url: &str) {
            self.live_urls.retain(|u| u != url);
        }
    }

    fn artifact() -> ExportArtifact {
        ExportArtifact {
            filename: "payables.csv".into(),
            mime: "text/csv;charset=utf-8",
            bytes: b"a,b".to_vec(),
        }
    }

    #[test]
    fn test_download_cleans_up() {
        let mut doc = FakeDocument::default();
        trigger_download(&mut doc, &artifact()).unwrap();
        assert_eq!(doc.clicked, vec![("blob:payables.csv".to_string(), "payables.csv".to_string())]);
        assert!(doc.live_urls.is_empty());
        assert!(doc.anchors.is_empty());
    }

    #[test]
    fn test_url_revoked_when_anchor_fails() {
        let mut doc = FakeDocument {
            fail_attach: true,
            ..Default::default()
        };
        assert!(trigger_download(&mut doc, &artifact()).is_err());
        assert!(doc.live_urls.is_empty());
        assert!(doc.clicked.is_empty());
    }

    #[test]
    fn test_url_revoked_when_detach_fails() {
        let mut doc = FakeDocument {
            fail_detach: true,
            ..Default::default()
        };
        assert!(trigger_download(&mut doc, &artifact()).is_err());
        assert!(doc.live_urls.is_empty());
    }

    fn spec() -> ReportSpec {
        ReportSpec::new("Payables", "payables").column(ColumnSpec::text("Supplier", "supplier"))
    }

    fn meta() -> DocumentMeta {
        DocumentMeta::new(BusinessInfo::default(), NaiveDate::from_ymd_opt(2024, 4, 9).unwrap())
    }

    #[test]
    fn test_phases_on_success() {
        let phases = RefCell::new(Vec::new());
        let rows = normalize_rows(&spec(), &[json!({"supplier": "Alpha"})]);
        let mut doc = FakeDocument::default();
        export_and_download(
            &mut doc,
            |p| phases.borrow_mut().push(p),
            ExportFormat::Csv,
            &spec(),
            &rows,
            None,
            &meta(),
        )
        .unwrap();
        assert_eq!(
            *phases.borrow(),
            vec![ExportPhase::Encoding, ExportPhase::Triggering, ExportPhase::Idle]
        );
        assert_eq!(doc.clicked.len(), 1);
    }

    #[test]
    fn test_busy_flag_cleared_when_encoding_fails() {
        let busy = RefCell::new(Vec::new());
        let mut doc = FakeDocument::default();
        let result = export_and_download(
            &mut doc,
            |p| busy.borrow_mut().push(p.is_busy()),
            ExportFormat::Pdf,
            &spec(),
            &[],
            None,
            &meta(),
        );
        assert_eq!(result, Err(ExportError::EmptyReport));
        assert_eq!(*busy.borrow(), vec![true, false]);
        assert!(doc.clicked.is_empty());
    }
}

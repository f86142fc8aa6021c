//! Declarative page metadata.
//!
//! Pages describe themselves with a [`PageMeta`]; the shell is the only
//! place that writes it to the document.

use leptos::prelude::*;

pub const APP_TITLE: &str = "Chemist Admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub title: &'static str,
}

impl PageMeta {
    pub const fn new(title: &'static str) -> Self {
        Self { title }
    }

    /// `Supplier Payables | Chemist Admin`
    pub fn document_title(&self) -> String {
        document_title(Some(self.title))
    }
}

pub fn document_title(page: Option<&str>) -> String {
    match page.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => format!("{} | {}", title, APP_TITLE),
        None => APP_TITLE.to_string(),
    }
}

/// Keep `document.title` in sync with the active page
pub fn sync_document_title(active: Signal<Option<PageMeta>>) {
    Effect::new(move |_| {
        let title = document_title(active.get().map(|m| m.title));
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(&title);
        }
    });
}

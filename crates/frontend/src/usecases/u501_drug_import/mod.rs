pub mod api;
mod view;

pub use view::DrugImportWidget;

use crate::shared::page_meta::PageMeta;

pub const PAGE_ID: &str = "u501_drug_import";
pub const META: PageMeta = PageMeta::new("Import Drugs");

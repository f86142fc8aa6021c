pub mod api;
pub mod ui;

use crate::shared::page_meta::PageMeta;

pub const PAGE_ID: &str = "d400_store_summary";
pub const META: PageMeta = PageMeta::new("Dashboard");

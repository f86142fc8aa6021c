pub mod api;
mod ui;

pub use ui::ProfilePage;

use crate::shared::page_meta::PageMeta;

pub const PAGE_ID: &str = "sys_profile";
pub const META: PageMeta = PageMeta::new("My Profile");

pub mod api_utils;
pub mod business_info;
pub mod components;
pub mod config;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod page_frame;
pub mod page_meta;
pub mod report_page;

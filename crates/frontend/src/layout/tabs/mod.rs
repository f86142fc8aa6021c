//! Tab management: `page` wraps a tab's content, `registry` maps a tab key
//! to its view, `tab_labels` maps a tab key to its page metadata.

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{page_meta_for_key, tab_label_for_key};

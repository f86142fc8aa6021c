use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

use crate::layout::tabs::{page_meta_for_key, tab_label_for_key};
use crate::shared::page_meta::PageMeta;

/// Opened tabs and the active one, shared through context
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// `?active=<tab key>` in the address bar
#[derive(Debug, Default, Serialize, Deserialize)]
struct TabQuery {
    #[serde(default)]
    active: Option<String>,
}

fn active_from_search(search: &str) -> Option<String> {
    serde_qs::from_str::<TabQuery>(search.trim_start_matches('?'))
        .ok()
        .and_then(|q| q.active)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

fn search_for_active(key: &str) -> String {
    let query = TabQuery {
        active: Some(key.to_string()),
    };
    format!("?{}", serde_qs::to_string(&query).unwrap_or_default())
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Restore the tab named in the URL, then keep the URL following the
    /// active tab. Unknown keys fall back to `home`.
    pub fn init_router_integration(&self, home: &'static str) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        match active_from_search(&search).filter(|key| page_meta_for_key(key).is_some()) {
            Some(key) => self.open_page(&key),
            None => self.open_page(home),
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let new_url = search_for_active(&active_key);
            let Some(w) = window() else {
                return;
            };
            let current_search = w.location().search().unwrap_or_default();
            if current_search == new_url {
                return;
            }
            if let Ok(history) = w.history() {
                if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url)) {
                    log::warn!("could not update the address bar: {:?}", e);
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            log::debug!("open tab '{}'", key);
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    /// Open a registered page under its own title
    pub fn open_page(&self, key: &str) {
        let title = tab_label_for_key(key);
        self.open_tab(key, if title.is_empty() { key } else { title });
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close tab '{}'", key);
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()));
            self.active.set(next_active);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }

    /// Metadata of the active page, for the document title
    pub fn active_meta(&self) -> Signal<Option<PageMeta>> {
        let active = self.active;
        Signal::derive(move || active.with(|key| key.as_deref().and_then(page_meta_for_key)))
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_from_search() {
        assert_eq!(active_from_search("?active=p900_payables").as_deref(), Some("p900_payables"));
        assert_eq!(active_from_search("active=d400_store_summary&x=1").as_deref(), Some("d400_store_summary"));
        assert_eq!(active_from_search("?active="), None);
        assert_eq!(active_from_search(""), None);
    }

    #[test]
    fn test_search_round_trips_key() {
        let search = search_for_active("p907_suppliers");
        assert_eq!(search, "?active=p907_suppliers");
        assert_eq!(active_from_search(&search).as_deref(), Some("p907_suppliers"));
    }
}

//! Store configuration
//!
//! The page contract is fixed; defaults are the literals the site markup uses.

use crate::consts;

/// Names the store uses to find its storage slot and DOM elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// LocalStorage key holding the whole selection record
    pub storage_key: String,
    /// Class toggled on selected item elements
    pub selected_class: String,
    /// Attribute carrying an item's id in markup
    pub id_attribute: String,
    /// Selector for the progress bar (first match wins)
    pub progress_selector: String,
    /// Attribute receiving the numeric progress value
    pub progress_value_attribute: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: consts::STORAGE_KEY.to_string(),
            selected_class: consts::SELECTED_CLASS.to_string(),
            id_attribute: consts::ID_ATTRIBUTE.to_string(),
            progress_selector: consts::PROGRESS_SELECTOR.to_string(),
            progress_value_attribute: consts::PROGRESS_VALUE_ATTRIBUTE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Use a different storage key (e.g. one planner per site section)
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

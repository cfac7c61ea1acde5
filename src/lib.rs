//! Trip Selections - persisted trip planning choices for the travel site
//!
//! Core modules:
//! - `selection`: Pure selection state (categories, toggle, merge, progress)
//! - `store`: Selection store tying state to storage and view
//! - `storage`: LocalStorage on web, in-memory elsewhere
//! - `view`: Presentation sync (DOM on web, recording view elsewhere)
//! - `web`: JS entry points (WASM only)

pub mod config;
pub mod error;
pub mod selection;
pub mod storage;
pub mod store;
pub mod view;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::StoreConfig;
pub use error::{SelectionError, StorageError};
pub use selection::{Category, ItemId, SelectionState, TripSummary};
pub use store::SelectionStore;

/// Page contract constants
pub mod consts {
    /// LocalStorage key of the selection record
    pub const STORAGE_KEY: &str = "tripSelections";
    /// Class marking a selected item
    pub const SELECTED_CLASS: &str = "selected";
    /// Attribute holding an item's id
    pub const ID_ATTRIBUTE: &str = "data-id";
    /// Progress bar selector
    pub const PROGRESS_SELECTOR: &str = ".progress-bar";
    pub const PROGRESS_VALUE_ATTRIBUTE: &str = "aria-valuenow";
}

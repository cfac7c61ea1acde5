//! Selection store
//!
//! Owns the page's selection state together with its storage slot and view.
//! Every mutation writes the whole state back before the view is refreshed.

use crate::config::StoreConfig;
use crate::error::{Result, SelectionError};
use crate::selection::{Category, ItemId, SelectionState, StoredSelections, TripSummary};
use crate::storage::SelectionStorage;
use crate::view::SelectionView;

pub struct SelectionStore<S, V> {
    state: SelectionState,
    storage: S,
    view: V,
    config: StoreConfig,
}

impl<S: SelectionStorage, V: SelectionView> SelectionStore<S, V> {
    /// Create a store with empty selections and the default page contract
    pub fn new(storage: S, view: V) -> Self {
        Self::with_config(storage, view, StoreConfig::default())
    }

    pub fn with_config(storage: S, view: V, config: StoreConfig) -> Self {
        Self {
            state: SelectionState::new(),
            storage,
            view,
            config,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Flip `id` in `category`, mark `element`, persist, refresh progress.
    ///
    /// A failed write leaves the in-memory change and the element marker in
    /// place and skips the progress refresh.
    pub fn toggle_selection(
        &mut self,
        category: Category,
        id: ItemId,
        element: &V::Element,
    ) -> Result<()> {
        let selected = self.state.toggle(category, id);
        self.view.set_selected(element, selected);
        self.save()?;
        self.update_progress();
        Ok(())
    }

    /// Same as [`toggle_selection`](Self::toggle_selection) with a markup
    /// category key. Unknown keys change nothing.
    pub fn toggle_selection_named(
        &mut self,
        category: &str,
        id: ItemId,
        element: &V::Element,
    ) -> Result<()> {
        let category = Category::parse(category)
            .ok_or_else(|| SelectionError::UnknownCategory(category.to_string()))?;
        self.toggle_selection(category, id, element)
    }

    /// Push current progress to the view. Returns the percentage.
    pub fn update_progress(&mut self) -> u8 {
        let progress = self.state.progress();
        if !self.view.set_progress(progress) {
            log::debug!("No progress bar on this page");
        }
        progress
    }

    /// Restore from the storage slot.
    ///
    /// Returns false if nothing (or an empty value) was stored. Otherwise
    /// merges the record, highlights rendered items and refreshes progress.
    pub fn load_selections(&mut self) -> Result<bool> {
        let json = self.storage.read(&self.config.storage_key)?;
        let Some(json) = json.filter(|json| !json.is_empty()) else {
            log::info!("No saved selections, starting fresh");
            return Ok(false);
        };

        let stored = StoredSelections::parse(&json)?;
        self.state.merge(stored);

        let highlighted = self.highlight_selected_items();
        let progress = self.update_progress();
        log::info!(
            "Loaded saved selections ({} highlighted, {}% planned)",
            highlighted,
            progress
        );
        Ok(true)
    }

    /// Mark every rendered item that is selected. Ids without an element on
    /// this page are skipped. Returns the number of items marked.
    pub fn highlight_selected_items(&mut self) -> usize {
        let mut highlighted = 0;
        for category in Category::ALL {
            for id in self.state.list(category) {
                if self.view.mark_item(&id.as_dom_id(), true) {
                    highlighted += 1;
                }
            }
        }
        highlighted
    }

    pub fn is_selected(&self, category: Category, id: &ItemId) -> bool {
        self.state.contains(category, id)
    }

    /// Current state serialized exactly as it is stored
    pub fn selections_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state)?)
    }

    pub fn summary(&self) -> TripSummary {
        self.state.summary()
    }

    /// Start a new trip: unmark rendered items, empty every category,
    /// drop the stored record and reset progress.
    pub fn clear_selections(&mut self) -> Result<()> {
        for (_, ids) in self.state.iter() {
            for id in ids {
                self.view.mark_item(&id.as_dom_id(), false);
            }
        }
        self.state.clear();
        self.storage.remove(&self.config.storage_key)?;
        self.update_progress();
        log::info!("Selections cleared");
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.state)?;
        self.storage.write(&self.config.storage_key, &json)?;
        log::debug!("Selections saved ({} bytes)", json.len());
        Ok(())
    }
}

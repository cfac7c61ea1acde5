//! Presentation sync
//!
//! The store never touches markup directly. It reports selection and
//! progress changes through [`SelectionView`]; the DOM implementation lives
//! behind wasm32, and [`RecordingView`] stands in for a page natively.

/// Narrow rendering interface the store drives
pub trait SelectionView {
    /// Handle of a clickable item element
    type Element;

    /// Set or clear the selected marker on an element the caller holds
    fn set_selected(&mut self, element: &Self::Element, selected: bool);

    /// Set or clear the marker on the first element whose id attribute
    /// equals `dom_id`. Returns false if no such element is rendered.
    fn mark_item(&mut self, dom_id: &str, selected: bool) -> bool;

    /// Write progress (percent) to the progress bar. Returns false if the
    /// page has no progress bar.
    fn set_progress(&mut self, percent: u8) -> bool;
}

/// A rendered item in a [`RecordingView`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedItem {
    pub dom_id: Option<String>,
    pub selected: bool,
}

/// Progress bar state in a [`RecordingView`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressBar {
    /// Inline width style, e.g. "50%"
    pub width: Option<String>,
    /// Numeric progress attribute
    pub value: Option<String>,
}

/// In-memory page: a flat list of items plus an optional progress bar
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub items: Vec<RenderedItem>,
    pub progress_bar: Option<ProgressBar>,
    /// Number of writes made to the page
    pub mutations: usize,
}

impl RecordingView {
    /// Page with a progress bar and no items
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            progress_bar: Some(ProgressBar::default()),
            mutations: 0,
        }
    }

    /// Page without a progress bar
    pub fn without_progress_bar() -> Self {
        Self::default()
    }

    /// Render an item and return its handle
    pub fn add_item(&mut self, dom_id: &str) -> usize {
        self.items.push(RenderedItem {
            dom_id: Some(dom_id.to_string()),
            selected: false,
        });
        self.items.len() - 1
    }

    pub fn is_selected(&self, element: usize) -> bool {
        self.items.get(element).map(|item| item.selected).unwrap_or(false)
    }

    pub fn progress_width(&self) -> Option<&str> {
        self.progress_bar.as_ref()?.width.as_deref()
    }

    pub fn progress_value(&self) -> Option<&str> {
        self.progress_bar.as_ref()?.value.as_deref()
    }
}

impl SelectionView for RecordingView {
    type Element = usize;

    fn set_selected(&mut self, element: &usize, selected: bool) {
        if let Some(item) = self.items.get_mut(*element) {
            item.selected = selected;
            self.mutations += 1;
        }
    }

    fn mark_item(&mut self, dom_id: &str, selected: bool) -> bool {
        let found = self
            .items
            .iter()
            .position(|item| item.dom_id.as_deref() == Some(dom_id));
        match found {
            Some(index) => {
                self.set_selected(&index, selected);
                true
            }
            None => false,
        }
    }

    fn set_progress(&mut self, percent: u8) -> bool {
        let Some(bar) = self.progress_bar.as_mut() else {
            return false;
        };
        bar.width = Some(format!("{}%", percent));
        bar.value = Some(percent.to_string());
        self.mutations += 1;
        true
    }
}

/// Live document (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct DomView {
    document: web_sys::Document,
    selected_class: String,
    id_attribute: String,
    progress_selector: String,
    progress_value_attribute: String,
}

#[cfg(target_arch = "wasm32")]
impl DomView {
    pub fn new(document: web_sys::Document, config: &crate::StoreConfig) -> Self {
        Self {
            document,
            selected_class: config.selected_class.clone(),
            id_attribute: config.id_attribute.clone(),
            progress_selector: config.progress_selector.clone(),
            progress_value_attribute: config.progress_value_attribute.clone(),
        }
    }

    /// First element whose id attribute equals `dom_id`.
    ///
    /// Compares attribute values instead of building a selector, so ids with
    /// quotes or brackets cannot break the query.
    fn find_item(&self, dom_id: &str) -> Option<web_sys::Element> {
        use wasm_bindgen::JsCast;

        let nodes = self
            .document
            .query_selector_all(&format!("[{}]", self.id_attribute))
            .ok()?;
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .find(|el| el.get_attribute(&self.id_attribute).as_deref() == Some(dom_id))
    }
}

#[cfg(target_arch = "wasm32")]
impl SelectionView for DomView {
    type Element = web_sys::Element;

    fn set_selected(&mut self, element: &web_sys::Element, selected: bool) {
        let classes = element.class_list();
        let result = if selected {
            classes.add_1(&self.selected_class)
        } else {
            classes.remove_1(&self.selected_class)
        };
        if let Err(e) = result {
            log::warn!("Failed to update item class: {:?}", e);
        }
    }

    fn mark_item(&mut self, dom_id: &str, selected: bool) -> bool {
        match self.find_item(dom_id) {
            Some(el) => {
                self.set_selected(&el, selected);
                true
            }
            None => false,
        }
    }

    fn set_progress(&mut self, percent: u8) -> bool {
        use wasm_bindgen::JsCast;

        let Some(bar) = self
            .document
            .query_selector(&self.progress_selector)
            .ok()
            .flatten()
        else {
            return false;
        };

        if let Some(html) = bar.dyn_ref::<web_sys::HtmlElement>() {
            let _ = html.style().set_property("width", &format!("{}%", percent));
        }
        let _ = bar.set_attribute(&self.progress_value_attribute, &percent.to_string());
        true
    }
}

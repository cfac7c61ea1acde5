//! Browser entry points
//!
//! Page markup calls these from click handlers. The page's store is created
//! on first use and lives for the lifetime of the page.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::error::SelectionError;
use crate::selection::ItemId;
use crate::storage::LocalStorage;
use crate::view::DomView;
use crate::{SelectionStore, StoreConfig};

type PageStore = SelectionStore<LocalStorage, DomView>;

thread_local! {
    static STORE: RefCell<Option<PageStore>> = const { RefCell::new(None) };
}

fn build_store() -> Result<PageStore, JsValue> {
    let config = StoreConfig::default();
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from(js_sys::Error::new("no document")))?;
    let storage = LocalStorage::open().map_err(|e| to_js(e.into()))?;
    let view = DomView::new(document, &config);
    Ok(SelectionStore::with_config(storage, view, config))
}

fn with_store<T>(
    f: impl FnOnce(&mut PageStore) -> Result<T, SelectionError>,
) -> Result<T, JsValue> {
    STORE.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(build_store()?);
        }
        match slot.as_mut() {
            Some(store) => f(store).map_err(to_js),
            None => Err(js_sys::Error::new("selection store unavailable").into()),
        }
    })
}

/// Log and convert to a thrown JS `Error`
fn to_js(err: SelectionError) -> JsValue {
    log::error!("{}", err);
    js_sys::Error::new(&err.to_string()).into()
}

fn item_id_from_js(id: &JsValue) -> Result<ItemId, JsValue> {
    if let Some(s) = id.as_string() {
        return Ok(ItemId::Text(s));
    }
    if let Some(n) = id.as_f64() {
        return Ok(ItemId::Number(n));
    }
    Err(js_sys::Error::new("item id must be a string or a number").into())
}

#[wasm_bindgen(js_name = toggleSelection)]
pub fn toggle_selection(category: &str, id: JsValue, element: Element) -> Result<(), JsValue> {
    let id = item_id_from_js(&id)?;
    with_store(|store| store.toggle_selection_named(category, id, &element))
}

#[wasm_bindgen(js_name = loadSelections)]
pub fn load_selections() -> Result<(), JsValue> {
    with_store(|store| store.load_selections().map(|_| ()))
}

/// Stored selections as JSON, for the trip summary page
#[wasm_bindgen(js_name = getSelections)]
pub fn get_selections() -> Result<String, JsValue> {
    with_store(|store| store.selections_json())
}

#[wasm_bindgen(js_name = clearSelections)]
pub fn clear_selections() -> Result<(), JsValue> {
    with_store(|store| store.clear_selections())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document, selections disabled");
        return;
    };

    if document.ready_state() != "loading" {
        // Module loaded after DOMContentLoaded already fired
        let _ = load_selections();
        return;
    }

    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let _ = load_selections();
    });
    let _ = document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
    closure.forget();
}

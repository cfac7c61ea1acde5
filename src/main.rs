//! Trip Selections entry point
//!
//! The browser build exposes its entry points from the library. Natively
//! this inspects a saved selection record (as copied out of LocalStorage)
//! and prints its trip summary.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use trip_selections::consts::STORAGE_KEY;
    use trip_selections::storage::MemoryStorage;
    use trip_selections::view::RecordingView;
    use trip_selections::SelectionStore;

    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: trip-selections <saved-selections.json>");
        std::process::exit(2);
    };

    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to read {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let mut storage = MemoryStorage::new();
    storage.insert(STORAGE_KEY, json.trim());
    let mut store = SelectionStore::new(storage, RecordingView::new());

    if let Err(e) = store.load_selections() {
        log::error!("{}", e);
        std::process::exit(1);
    }

    match serde_json::to_string_pretty(&store.summary()) {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            log::error!("Failed to format summary: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

//! Selection state module
//!
//! Pure state transitions for the trip planner:
//! - Closed set of categories
//! - Toggle with per-category uniqueness
//! - Shallow merge of a stored record
//! - Progress derived from filled categories

pub mod category;
pub mod state;

pub use category::Category;
pub use state::{ItemId, PROGRESS_STEP, SelectionState, StoredSelections, TripSummary};

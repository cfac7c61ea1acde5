//! Selection state and the stored record
//!
//! Pure bookkeeping: no storage and no DOM access happens here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Category;

/// Points each contributing category adds once it has a selection
pub const PROGRESS_STEP: u8 = 25;

/// Opaque identifier of a selectable item.
///
/// Markup passes either strings or numbers. A number and a string with the
/// same digits are different ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(f64),
    Text(String),
}

impl ItemId {
    /// String form compared against the DOM identifying attribute
    pub fn as_dom_id(&self) -> String {
        match self {
            ItemId::Text(s) => s.clone(),
            ItemId::Number(n) => js_number_string(*n),
        }
    }
}

/// Format a number the way JS `String(n)` does
fn js_number_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Covers -0 as well
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        // Display is shortest round-trip without exponent: 7, 2.5, 0.000015
        return n.to_string();
    }

    // JS writes an explicit sign on positive exponents: 1e+21, 1.5e-7
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::Text(s)
    }
}

impl From<f64> for ItemId {
    fn from(n: f64) -> Self {
        ItemId::Number(n)
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n as f64)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_dom_id())
    }
}

/// Everything the traveller has picked so far, one ordered list per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub destinations: Vec<ItemId>,
    pub attractions: Vec<ItemId>,
    pub accommodations: Vec<ItemId>,
    pub travel_agencies: Vec<ItemId>,
    pub car_rentals: Vec<ItemId>,
}

impl SelectionState {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids of a category, in selection order
    pub fn list(&self, category: Category) -> &[ItemId] {
        match category {
            Category::Destinations => &self.destinations,
            Category::Attractions => &self.attractions,
            Category::Accommodations => &self.accommodations,
            Category::TravelAgencies => &self.travel_agencies,
            Category::CarRentals => &self.car_rentals,
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<ItemId> {
        match category {
            Category::Destinations => &mut self.destinations,
            Category::Attractions => &mut self.attractions,
            Category::Accommodations => &mut self.accommodations,
            Category::TravelAgencies => &mut self.travel_agencies,
            Category::CarRentals => &mut self.car_rentals,
        }
    }

    /// Check if an id is selected in a category
    pub fn contains(&self, category: Category, id: &ItemId) -> bool {
        self.list(category).contains(id)
    }

    /// Flip membership of `id` in `category`.
    ///
    /// Removes the first matching occurrence if present, otherwise appends.
    /// Returns true if the id is selected afterwards.
    pub fn toggle(&mut self, category: Category, id: ItemId) -> bool {
        let list = self.list_mut(category);
        match list.iter().position(|existing| *existing == id) {
            Some(index) => {
                list.remove(index);
                false
            }
            None => {
                list.push(id);
                true
            }
        }
    }

    /// Planning progress in percent: 0, 25, 50, 75 or 100
    pub fn progress(&self) -> u8 {
        Category::ALL
            .iter()
            .filter(|c| c.contributes_to_progress() && !self.list(**c).is_empty())
            .map(|_| PROGRESS_STEP)
            .sum()
    }

    /// Overwrite every list the stored record carries; leave the rest alone
    pub fn merge(&mut self, stored: StoredSelections) {
        let StoredSelections {
            destinations,
            attractions,
            accommodations,
            travel_agencies,
            car_rentals,
        } = stored;

        let incoming = [
            (Category::Destinations, destinations),
            (Category::Attractions, attractions),
            (Category::Accommodations, accommodations),
            (Category::TravelAgencies, travel_agencies),
            (Category::CarRentals, car_rentals),
        ];
        for (category, list) in incoming {
            if let Some(list) = list {
                *self.list_mut(category) = list;
            }
        }
    }

    /// Drop every selection
    pub fn clear(&mut self) {
        for category in Category::ALL {
            self.list_mut(category).clear();
        }
    }

    /// Check if nothing is selected in any category
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.list(*c).is_empty())
    }

    /// Iterate categories with their selections, in storage order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ItemId])> {
        Category::ALL.into_iter().map(move |c| (c, self.list(c)))
    }

    /// Counts for the trip summary page
    pub fn summary(&self) -> TripSummary {
        let counts: BTreeMap<Category, usize> = self.iter().map(|(c, ids)| (c, ids.len())).collect();
        TripSummary {
            total: counts.values().sum(),
            counts,
            progress: self.progress(),
        }
    }
}

/// Stored record as read back from the durable slot.
///
/// Every key is optional so a record missing a category leaves that
/// category's in-memory list as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredSelections {
    pub destinations: Option<Vec<ItemId>>,
    pub attractions: Option<Vec<ItemId>>,
    pub accommodations: Option<Vec<ItemId>>,
    pub travel_agencies: Option<Vec<ItemId>>,
    pub car_rentals: Option<Vec<ItemId>>,
}

impl StoredSelections {
    /// Parse a stored record.
    ///
    /// The record must be a JSON object; only the five category keys are
    /// read and anything else is ignored. A top-level `null` parses as an
    /// empty record, and a `null` category counts as absent.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let Some(mut record) = serde_json::from_str::<Option<Map<String, Value>>>(json)? else {
            return Ok(Self::default());
        };

        let mut take = |category: Category| -> Result<Option<Vec<ItemId>>, serde_json::Error> {
            match record.remove(category.as_str()) {
                None | Some(Value::Null) => Ok(None),
                Some(list) => serde_json::from_value(list).map(Some),
            }
        };

        Ok(Self {
            destinations: take(Category::Destinations)?,
            attractions: take(Category::Attractions)?,
            accommodations: take(Category::Accommodations)?,
            travel_agencies: take(Category::TravelAgencies)?,
            car_rentals: take(Category::CarRentals)?,
        })
    }
}

/// Per-category counts plus overall progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripSummary {
    pub counts: BTreeMap<Category, usize>,
    pub total: usize,
    pub progress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut state = SelectionState::new();
        assert!(state.toggle(Category::Destinations, "paris".into()));
        assert_eq!(state.destinations, vec![ItemId::from("paris")]);

        assert!(!state.toggle(Category::Destinations, "paris".into()));
        assert!(state.destinations.is_empty());
    }

    #[test]
    fn test_readd_goes_to_end() {
        let mut state = SelectionState::new();
        state.toggle(Category::Accommodations, "a".into());
        state.toggle(Category::Accommodations, "b".into());
        state.toggle(Category::Accommodations, "a".into());
        state.toggle(Category::Accommodations, "a".into());
        assert_eq!(state.accommodations, vec![ItemId::from("b"), ItemId::from("a")]);
    }

    #[test]
    fn test_number_and_text_ids_are_distinct() {
        let mut state = SelectionState::new();
        state.toggle(Category::CarRentals, ItemId::from(1i64));
        state.toggle(Category::CarRentals, ItemId::from("1"));
        assert_eq!(state.car_rentals.len(), 2);
        assert!(state.contains(Category::CarRentals, &ItemId::Number(1.0)));
    }

    #[test]
    fn test_dom_id_formatting() {
        assert_eq!(ItemId::from(42i64).as_dom_id(), "42");
        assert_eq!(ItemId::from(2.5).as_dom_id(), "2.5");
        assert_eq!(ItemId::from("hertz").as_dom_id(), "hertz");
    }

    #[test]
    fn test_dom_id_matches_js_number_strings() {
        assert_eq!(ItemId::from(1e21).as_dom_id(), "1e+21");
        assert_eq!(ItemId::from(1.5e22).as_dom_id(), "1.5e+22");
        assert_eq!(ItemId::from(1e20).as_dom_id(), "100000000000000000000");
        assert_eq!(ItemId::from(1e-6).as_dom_id(), "0.000001");
        assert_eq!(ItemId::from(1e-7).as_dom_id(), "1e-7");
        assert_eq!(ItemId::from(2.5e-8).as_dom_id(), "2.5e-8");
        assert_eq!(ItemId::from(0.000015).as_dom_id(), "0.000015");
        assert_eq!(ItemId::from(-3.0).as_dom_id(), "-3");
        assert_eq!(ItemId::from(-0.0).as_dom_id(), "0");
        assert_eq!(ItemId::from(f64::INFINITY).as_dom_id(), "Infinity");
    }

    #[test]
    fn test_progress_ignores_attractions() {
        let mut state = SelectionState::new();
        state.toggle(Category::Attractions, "louvre".into());
        assert_eq!(state.progress(), 0);

        state.toggle(Category::Destinations, "paris".into());
        state.toggle(Category::CarRentals, "hertz".into());
        assert_eq!(state.progress(), 50);

        state.toggle(Category::Accommodations, 3i64.into());
        state.toggle(Category::TravelAgencies, 9i64.into());
        assert_eq!(state.progress(), 100);
    }

    #[test]
    fn test_merge_only_overwrites_present_keys() {
        let mut state = SelectionState::new();
        state.toggle(Category::Attractions, "louvre".into());
        state.toggle(Category::Destinations, "rome".into());

        let stored =
            StoredSelections::parse(r#"{"destinations":["paris"],"carRentals":["hertz"]}"#).unwrap();
        state.merge(stored);

        assert_eq!(state.destinations, vec![ItemId::from("paris")]);
        assert_eq!(state.car_rentals, vec![ItemId::from("hertz")]);
        assert_eq!(state.attractions, vec![ItemId::from("louvre")]);
    }

    #[test]
    fn test_stored_record_ignores_unknown_keys() {
        let stored = StoredSelections::parse(r#"{"flights":["x"],"accommodations":[12]}"#).unwrap();
        assert_eq!(stored.accommodations, Some(vec![ItemId::Number(12.0)]));
        assert_eq!(stored.destinations, None);
    }

    #[test]
    fn test_stored_record_must_be_object() {
        assert!(StoredSelections::parse("[]").is_err());
        assert!(StoredSelections::parse(r#"[["paris"]]"#).is_err());
        assert!(StoredSelections::parse(r#""paris""#).is_err());
        assert!(StoredSelections::parse("42").is_err());
    }

    #[test]
    fn test_stored_null_is_empty_record() {
        assert_eq!(StoredSelections::parse("null").unwrap(), StoredSelections::default());

        let stored = StoredSelections::parse(r#"{"destinations":null,"carRentals":["hertz"]}"#).unwrap();
        assert_eq!(stored.destinations, None);
        assert_eq!(stored.car_rentals, Some(vec![ItemId::from("hertz")]));
    }

    #[test]
    fn test_stored_category_must_be_list() {
        assert!(StoredSelections::parse(r#"{"destinations":"paris"}"#).is_err());
        assert!(StoredSelections::parse(r#"{"carRentals":{"0":"hertz"}}"#).is_err());
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let mut state = SelectionState::new();
        state.toggle(Category::TravelAgencies, "acme".into());
        let value = serde_json::to_value(&state).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        for category in Category::ALL {
            assert!(keys.contains(&category.as_str().to_string()));
        }
        assert_eq!(value["travelAgencies"][0], "acme");
    }

    #[test]
    fn test_summary_counts() {
        let mut state = SelectionState::new();
        state.toggle(Category::Destinations, "paris".into());
        state.toggle(Category::Attractions, "louvre".into());
        state.toggle(Category::Attractions, "orsay".into());

        let summary = state.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.counts[&Category::Attractions], 2);
        assert_eq!(summary.counts[&Category::CarRentals], 0);
        assert_eq!(summary.progress, 25);
    }

    #[test]
    fn test_clear() {
        let mut state = SelectionState::new();
        state.toggle(Category::Destinations, "paris".into());
        state.toggle(Category::Attractions, "louvre".into());
        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.progress(), 0);
    }

    fn arb_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    fn arb_id() -> impl Strategy<Value = ItemId> {
        prop_oneof![
            (0i64..50).prop_map(ItemId::from),
            "[a-z]{1,6}".prop_map(ItemId::from),
        ]
    }

    fn arb_state() -> impl Strategy<Value = SelectionState> {
        prop::collection::vec((arb_category(), arb_id()), 0..30).prop_map(|ops| {
            let mut state = SelectionState::new();
            for (category, id) in ops {
                state.toggle(category, id);
            }
            state
        })
    }

    proptest! {
        #[test]
        fn prop_double_toggle_restores_list(state in arb_state(), category in arb_category(), id in arb_id()) {
            let mut toggled = state.clone();
            toggled.toggle(category, id.clone());
            toggled.toggle(category, id.clone());

            let before = state.list(category);
            let after = toggled.list(category);
            if before.contains(&id) {
                // Removed then re-added at the end: same members, new order
                prop_assert_eq!(before.len(), after.len());
                prop_assert!(before.iter().all(|x| after.contains(x)));
                prop_assert_eq!(after.last(), Some(&id));
            } else {
                prop_assert_eq!(before, after);
            }
        }

        #[test]
        fn prop_ids_unique_per_category(state in arb_state()) {
            for (_, ids) in state.iter() {
                for (i, id) in ids.iter().enumerate() {
                    prop_assert!(!ids[i + 1..].contains(id));
                }
            }
        }

        #[test]
        fn prop_progress_counts_contributing_categories(state in arb_state()) {
            let filled = Category::ALL
                .iter()
                .filter(|c| c.contributes_to_progress() && !state.list(**c).is_empty())
                .count() as u8;
            prop_assert_eq!(state.progress(), filled * PROGRESS_STEP);
        }

        #[test]
        fn prop_attractions_never_move_progress(state in arb_state(), id in arb_id()) {
            let mut with_attraction = state.clone();
            with_attraction.toggle(Category::Attractions, id);
            prop_assert_eq!(state.progress(), with_attraction.progress());
        }

        #[test]
        fn prop_serialized_state_restores(state in arb_state()) {
            let json = serde_json::to_string(&state).unwrap();
            let mut restored = SelectionState::new();
            restored.merge(StoredSelections::parse(&json).unwrap());
            prop_assert_eq!(restored, state);
        }
    }
}

//! Selection categories

use serde::{Deserialize, Serialize};

/// One of the fixed groups a traveller picks items from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Destinations,
    Attractions,
    Accommodations,
    TravelAgencies,
    CarRentals,
}

impl Category {
    /// All categories in storage order
    pub const ALL: [Category; 5] = [
        Category::Destinations,
        Category::Attractions,
        Category::Accommodations,
        Category::TravelAgencies,
        Category::CarRentals,
    ];

    /// Key used in the stored record and by page markup
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Destinations => "destinations",
            Category::Attractions => "attractions",
            Category::Accommodations => "accommodations",
            Category::TravelAgencies => "travelAgencies",
            Category::CarRentals => "carRentals",
        }
    }

    /// Parse a markup key. Exact match only, keys are case sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "destinations" => Some(Category::Destinations),
            "attractions" => Some(Category::Attractions),
            "accommodations" => Some(Category::Accommodations),
            "travelAgencies" => Some(Category::TravelAgencies),
            "carRentals" => Some(Category::CarRentals),
            _ => None,
        }
    }

    /// Whether a non-empty list in this category adds to planning progress.
    ///
    /// Attractions are tracked like everything else but never move the bar.
    pub fn contributes_to_progress(&self) -> bool {
        match self {
            Category::Destinations => true,
            Category::Attractions => false,
            Category::Accommodations => true,
            Category::TravelAgencies => true,
            Category::CarRentals => true,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

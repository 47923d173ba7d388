//! Canonical category names the classifier normalizes into.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the single hub node every flow passes through.
pub const HUB_NAME: &str = "Budget";

/// The fixed set of category names recognised by the classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalCategory {
    Income,
    Housing,
    Food,
    Transportation,
    Shopping,
    Entertainment,
    Healthcare,
    Travel,
    Utilities,
    Education,
    Taxes,
    Gifts,
    Savings,
    Other,
}

impl CanonicalCategory {
    pub const ALL: [CanonicalCategory; 14] = [
        CanonicalCategory::Income,
        CanonicalCategory::Housing,
        CanonicalCategory::Food,
        CanonicalCategory::Transportation,
        CanonicalCategory::Shopping,
        CanonicalCategory::Entertainment,
        CanonicalCategory::Healthcare,
        CanonicalCategory::Travel,
        CanonicalCategory::Utilities,
        CanonicalCategory::Education,
        CanonicalCategory::Taxes,
        CanonicalCategory::Gifts,
        CanonicalCategory::Savings,
        CanonicalCategory::Other,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            CanonicalCategory::Income => "Income",
            CanonicalCategory::Housing => "Housing",
            CanonicalCategory::Food => "Food",
            CanonicalCategory::Transportation => "Transportation",
            CanonicalCategory::Shopping => "Shopping",
            CanonicalCategory::Entertainment => "Entertainment",
            CanonicalCategory::Healthcare => "Healthcare",
            CanonicalCategory::Travel => "Travel",
            CanonicalCategory::Utilities => "Utilities",
            CanonicalCategory::Education => "Education",
            CanonicalCategory::Taxes => "Taxes",
            CanonicalCategory::Gifts => "Gifts",
            CanonicalCategory::Savings => "Savings",
            CanonicalCategory::Other => "Other",
        }
    }

    /// Case-insensitive lookup by display name; surrounding whitespace is ignored.
    pub fn from_display_name(name: &str) -> Option<Self> {
        let needle = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.display_name().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for CanonicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

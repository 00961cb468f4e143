//! The closed set of expense categories.
//!
//! Categories are the one value in the ledger with a canonical form problem:
//! files written by hand may carry any casing. The rule here is that parsing
//! folds case into the typed variant, comparisons happen on the variant, and
//! the capitalized label exists only in `Display`.

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the predefined expense categories, in presentation order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Entertainment,
    Healthcare,
    Education,
    Rent,
    Others,
}

/// Every category, in the order shown by selection menus (1-indexed there).
pub const ALL_CATEGORIES: [Category; 8] = [
    Category::Food,
    Category::Transport,
    Category::Utilities,
    Category::Entertainment,
    Category::Healthcare,
    Category::Education,
    Category::Rent,
    Category::Others,
];

impl Category {
    /// The capitalized display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Rent => "Rent",
            Category::Others => "Others",
        }
    }

    /// Looks up a category by its 1-based menu position.
    pub fn from_index(index: usize) -> Option<Category> {
        if index == 0 {
            return None;
        }
        ALL_CATEGORIES.get(index - 1).copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        ALL_CATEGORIES
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| Error::parse("category", name))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Category::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact() {
        assert_eq!(Category::from_str("Food").unwrap(), Category::Food);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Category::from_str("food").unwrap(), Category::Food);
        assert_eq!(Category::from_str("HEALTHCARE").unwrap(), Category::Healthcare);
        assert_eq!(Category::from_str("  rEnt ").unwrap(), Category::Rent);
    }

    #[test]
    fn test_parse_unknown_rejected() {
        assert!(Category::from_str("Groceries").is_err());
        assert!(Category::from_str("").is_err());
    }

    #[test]
    fn test_display_capitalized() {
        assert_eq!(Category::Entertainment.to_string(), "Entertainment");
    }

    #[test]
    fn test_menu_order() {
        assert_eq!(ALL_CATEGORIES[0], Category::Food);
        assert_eq!(ALL_CATEGORIES[7], Category::Others);
        assert_eq!(ALL_CATEGORIES.len(), 8);
    }

    #[test]
    fn test_from_index_one_based() {
        assert_eq!(Category::from_index(1), Some(Category::Food));
        assert_eq!(Category::from_index(8), Some(Category::Others));
        assert_eq!(Category::from_index(0), None);
        assert_eq!(Category::from_index(9), None);
    }

    #[test]
    fn test_ordering_is_declaration_order() {
        assert!(Category::Food < Category::Transport);
        assert!(Category::Rent < Category::Others);
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&Category::Transport).unwrap();
        assert_eq!(json, "\"Transport\"");
        let back: Category = serde_json::from_str("\"transport\"").unwrap();
        assert_eq!(back, Category::Transport);
    }
}

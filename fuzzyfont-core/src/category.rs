//! Typographic category tags attached to every catalog entry.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};
use serde::{Deserialize, Serialize};

/// One of the six classification labels.
///
/// Declaration order is the display order used by stats and the filter menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mono,
    Serif,
    Sans,
    Display,
    Symbol,
    Other,
}

/// Set of tags held by a single font.
pub type CategorySet = BTreeSet<Category>;

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Mono,
        Category::Serif,
        Category::Sans,
        Category::Display,
        Category::Symbol,
        Category::Other,
    ];

    /// Categories a user can filter on; `other` is never selectable.
    pub const SELECTABLE: [Category; 5] = [
        Category::Mono,
        Category::Serif,
        Category::Sans,
        Category::Display,
        Category::Symbol,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Mono => "mono",
            Category::Serif => "serif",
            Category::Sans => "sans",
            Category::Display => "display",
            Category::Symbol => "symbol",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mono" | "monospace" => Ok(Category::Mono),
            "serif" => Ok(Category::Serif),
            "sans" | "sans-serif" => Ok(Category::Sans),
            "display" => Ok(Category::Display),
            "symbol" => Ok(Category::Symbol),
            "other" => Ok(Category::Other),
            _ => Err(anyhow!("unknown category: {raw}")),
        }
    }
}

/// Tag names in alphabetical order, the form used by tables and exports.
pub fn sorted_names(set: &CategorySet) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = set.iter().map(|c| c.as_str()).collect();
    names.sort_unstable();
    names
}

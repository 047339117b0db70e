//! Category filtering and name search for fuzzyfont-core

use crate::catalog::FontRecord;
use crate::category::{Category, CategorySet};

/// Combined category filter and name search, applied filter-first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    categories: CategorySet,
    search: String,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        self.categories = categories.into_iter().collect();
        self
    }

    /// Case-insensitive substring; surrounding whitespace is ignored.
    pub fn with_search(mut self, term: impl AsRef<str>) -> Self {
        self.search = term.as_ref().trim().to_string();
        self
    }

    /// Check whether a single record passes both predicates.
    pub fn matches(&self, font: &FontRecord) -> bool {
        (self.categories.is_empty() || font.has_any(&self.categories))
            && name_contains(&font.name, &self.search.to_lowercase())
    }

    /// Filter, then search, preserving input order.
    pub fn apply(&self, fonts: &[FontRecord]) -> Vec<FontRecord> {
        let filtered = filter_fonts(fonts, &self.categories);
        search_fonts(&filtered, &self.search)
    }
}

/// Keep fonts holding any of `wanted`; an empty set keeps everything.
pub fn filter_fonts(fonts: &[FontRecord], wanted: &CategorySet) -> Vec<FontRecord> {
    if wanted.is_empty() {
        return fonts.to_vec();
    }
    fonts
        .iter()
        .filter(|font| font.has_any(wanted))
        .cloned()
        .collect()
}

/// Keep fonts whose name contains `term`, ignoring case; an empty term keeps everything.
pub fn search_fonts(fonts: &[FontRecord], term: &str) -> Vec<FontRecord> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return fonts.to_vec();
    }
    fonts
        .iter()
        .filter(|font| name_contains(&font.name, &needle))
        .cloned()
        .collect()
}

fn name_contains(name: &str, lowered_needle: &str) -> bool {
    lowered_needle.is_empty() || name.to_lowercase().contains(lowered_needle)
}

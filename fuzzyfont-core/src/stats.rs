//! Per-category counts over a font list.

use std::collections::BTreeMap;

use crate::catalog::FontRecord;
use crate::category::Category;

/// Examples kept per category.
pub const MAX_EXAMPLES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub count: usize,
    pub examples: Vec<String>,
}

/// Aggregate over a font list. Every category is present, even with a zero count.
///
/// A font holding several tags counts once in each, so the per-category counts
/// may add up to more than `total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontStats {
    pub total: usize,
    pub categories: BTreeMap<Category, CategoryStats>,
}

impl FontStats {
    pub fn count(&self, category: Category) -> usize {
        self.categories.get(&category).map_or(0, |s| s.count)
    }

    pub fn examples(&self, category: Category) -> &[String] {
        self.categories
            .get(&category)
            .map_or(&[][..], |s| s.examples.as_slice())
    }
}

pub fn compute_stats(fonts: &[FontRecord]) -> FontStats {
    let mut categories: BTreeMap<Category, CategoryStats> = Category::ALL
        .iter()
        .map(|c| (*c, CategoryStats::default()))
        .collect();

    for font in fonts {
        for category in &font.categories {
            let entry = categories.entry(*category).or_default();
            entry.count += 1;
            if entry.examples.len() < MAX_EXAMPLES {
                entry.examples.push(font.name.clone());
            }
        }
    }

    FontStats {
        total: fonts.len(),
        categories,
    }
}

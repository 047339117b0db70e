//! Font classification for fuzzyfont-core
//!
//! A font name is classified in up to four stages, each running only when the
//! previous ones assigned nothing:
//!
//! 1. the override table of well-known families (single category),
//! 2. the declared family name read from the font file (at most one of
//!    mono, serif, sans), skipped when it merely repeats the font name,
//! 3. keyword groups matched against the name (any number of categories),
//! 4. `other`.
//!
//! The result is never empty.

use std::path::Path;

use log::debug;

use crate::category::{Category, CategorySet};
use crate::metadata::{FontFileMetadata, FontMetadataSource};

/// Well-known family names and the category they force.
pub const OVERRIDES: &[(&str, Category)] = &[
    ("fira code", Category::Mono),
    ("ubuntu mono", Category::Mono),
    ("source code pro", Category::Mono),
    ("inconsolata", Category::Mono),
    ("courier new", Category::Mono),
    ("roboto", Category::Sans),
    ("open sans", Category::Sans),
    ("lato", Category::Sans),
    ("noto sans", Category::Sans),
    ("arial", Category::Sans),
    ("helvetica", Category::Sans),
    ("segoe ui", Category::Sans),
    ("times new roman", Category::Serif),
    ("georgia", Category::Serif),
    ("cambria", Category::Serif),
    ("palatino", Category::Serif),
    ("noto serif", Category::Serif),
    ("impact", Category::Display),
    ("stencil", Category::Display),
    ("wingdings", Category::Symbol),
    ("webdings", Category::Symbol),
    ("emoji one", Category::Symbol),
];

const MONO_FAMILY_KEYWORDS: &[&str] = &[
    "mono", "courier", "code", "console", "fixed", "menlo", "monaco",
];
const MONO_NAME_KEYWORDS: &[&str] = &["mono", "code", "console", "fixed", "menlo", "monaco"];
const SERIF_KEYWORDS: &[&str] = &["serif", "times", "georgia", "cambria", "palatino"];
const SANS_KEYWORDS: &[&str] = &[
    "sans",
    "arial",
    "helvetica",
    "segoe",
    "noto sans",
    "open sans",
    "roboto",
];
const DISPLAY_KEYWORDS: &[&str] = &[
    "display", "poster", "impact", "headline", "stencil", "black", "grotesk",
];
const SYMBOL_KEYWORDS: &[&str] = &["symbol", "wingdings", "dingbat", "emoji", "webdings"];

/// Classifier with a pluggable source for family-name metadata.
#[derive(Debug, Clone)]
pub struct Classifier<M = FontFileMetadata> {
    metadata: Option<M>,
}

impl Default for Classifier<FontFileMetadata> {
    fn default() -> Self {
        Self::new(FontFileMetadata)
    }
}

impl Classifier<FontFileMetadata> {
    /// Classifier that never opens font files.
    pub fn name_only() -> Self {
        Self { metadata: None }
    }
}

impl<M: FontMetadataSource> Classifier<M> {
    pub fn new(metadata: M) -> Self {
        Self {
            metadata: Some(metadata),
        }
    }

    /// Classify a font by name, consulting the file's family name when a path is given.
    pub fn classify(&self, name: &str, path: Option<&Path>) -> CategorySet {
        let lowered = name.to_lowercase();

        if let Some(category) = override_for(&lowered) {
            return CategorySet::from([category]);
        }

        if let (Some(metadata), Some(path)) = (&self.metadata, path) {
            match metadata.family_name(path) {
                Ok(family) => {
                    let family = family.trim().to_lowercase();
                    // A family equal to the name adds nothing the keyword stage can't see.
                    if family != lowered.trim() {
                        if let Some(category) = family_category(&family) {
                            return CategorySet::from([category]);
                        }
                    }
                }
                Err(err) => debug!("family lookup failed for {}: {err:#}", path.display()),
            }
        }

        name_categories(&lowered)
    }
}

/// Classify by name alone (override table, keyword groups, fallback).
pub fn classify_name(name: &str) -> CategorySet {
    Classifier::<FontFileMetadata>::name_only().classify(name, None)
}

/// Longest matching override wins; equal lengths resolve to the earlier entry.
fn override_for(lowered: &str) -> Option<Category> {
    let mut best: Option<(&str, Category)> = None;
    for &(needle, category) in OVERRIDES {
        if !lowered.contains(needle) {
            continue;
        }
        match best {
            Some((current, _)) if current.len() >= needle.len() => {}
            _ => best = Some((needle, category)),
        }
    }
    best.map(|(_, category)| category)
}

fn family_category(lowered_family: &str) -> Option<Category> {
    [
        (MONO_FAMILY_KEYWORDS, Category::Mono),
        (SERIF_KEYWORDS, Category::Serif),
        (SANS_KEYWORDS, Category::Sans),
    ]
    .into_iter()
    .find(|(keywords, _)| contains_any(lowered_family, keywords))
    .map(|(_, category)| category)
}

fn name_categories(lowered: &str) -> CategorySet {
    let groups = [
        (MONO_NAME_KEYWORDS, Category::Mono),
        (SERIF_KEYWORDS, Category::Serif),
        (SANS_KEYWORDS, Category::Sans),
        (DISPLAY_KEYWORDS, Category::Display),
        (SYMBOL_KEYWORDS, Category::Symbol),
    ];

    let mut categories: CategorySet = groups
        .into_iter()
        .filter(|(keywords, _)| contains_any(lowered, keywords))
        .map(|(_, category)| category)
        .collect();

    if categories.is_empty() {
        categories.insert(Category::Other);
    }
    categories
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

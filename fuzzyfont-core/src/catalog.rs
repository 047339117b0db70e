//! Catalog loading: discovery, naming, deduplication, classification.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::category::{Category, CategorySet};
use crate::classify::Classifier;
use crate::discovery::FontDiscovery;
use crate::metadata::FontMetadataSource;

/// A discovered font file and the categories it was classified into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRecord {
    pub name: String,
    pub path: PathBuf,
    pub categories: CategorySet,
}

impl FontRecord {
    /// Unclassified record, as produced by the loader.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            categories: CategorySet::new(),
        }
    }

    /// Copy of this record carrying `categories`.
    pub fn with_categories<I>(&self, categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        Self {
            name: self.name.clone(),
            path: self.path.clone(),
            categories: categories.into_iter().collect(),
        }
    }

    pub fn has_any(&self, wanted: &CategorySet) -> bool {
        !self.categories.is_disjoint(wanted)
    }
}

#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Worker threads used to read name tables; `None` uses rayon's default pool.
    pub jobs: Option<usize>,
}

/// Discover fonts and return a deduplicated, name-sorted list with empty categories.
///
/// Failing to discover at all is an error. A file whose name cannot be read is
/// left out of the catalog without affecting the rest.
pub fn load_catalog<D, M>(discovery: &D, metadata: &M, opts: &LoadOptions) -> Result<Vec<FontRecord>>
where
    D: FontDiscovery,
    M: FontMetadataSource + Sync,
{
    let candidates = discovery.discover()?;
    debug!("discovered {} candidate font files", candidates.len());

    let read_all = || -> Vec<FontRecord> {
        candidates
            .par_iter()
            .filter_map(|loc| read_record(&loc.path, metadata))
            .collect()
    };

    let records = if let Some(jobs) = opts.jobs {
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        pool.install(read_all)
    } else {
        read_all()
    };

    let catalog = dedup_and_sort(records);
    info!("loaded {} fonts", catalog.len());
    Ok(catalog)
}

fn read_record<M: FontMetadataSource>(path: &Path, metadata: &M) -> Option<FontRecord> {
    let name = match metadata.font_name(path) {
        Ok(name) => name.trim().to_string(),
        Err(err) => {
            debug!("skipping {}: {err:#}", path.display());
            return None;
        }
    };
    if name.is_empty() {
        debug!("skipping {}: empty font name", path.display());
        return None;
    }
    Some(FontRecord::new(name, resolve_path(path)))
}

fn resolve_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Collapse entries sharing (lowercased name, resolved path) and sort by name.
pub fn dedup_and_sort(records: Vec<FontRecord>) -> Vec<FontRecord> {
    let mut seen: HashSet<(String, PathBuf)> = HashSet::new();
    let mut unique: Vec<FontRecord> = records
        .into_iter()
        .filter(|record| seen.insert((record.name.to_lowercase(), record.path.clone())))
        .collect();

    sort_records(&mut unique);
    unique
}

fn sort_records(records: &mut [FontRecord]) {
    records.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.path.cmp(&b.path))
    });
}

/// Attach categories to every record, keeping the input order.
pub fn classify_catalog<M: FontMetadataSource + Sync>(
    records: &[FontRecord],
    classifier: &Classifier<M>,
) -> Vec<FontRecord> {
    records
        .par_iter()
        .map(|record| record.with_categories(classifier.classify(&record.name, Some(&record.path))))
        .collect()
}

/// fuzzyfont-core: sort the fonts on a machine into typographic categories
///
/// The crate turns a pile of font files into a catalog of named records, each
/// tagged as `mono`, `serif`, `sans`, `display`, `symbol`, or `other`, and
/// offers the pieces needed to browse that catalog.
///
/// ## Pipeline
///
/// - [`discovery`] walks font directories for `ttf`/`otf`/`ttc`/`otc` files
/// - [`metadata`] reads family names from each file's `name` table
/// - [`catalog`] deduplicates and sorts the records, then attaches categories
/// - [`classify`] decides the categories (override table, family name, name keywords)
/// - [`query`] filters by category and searches by name
/// - [`stats`] counts fonts per category
/// - [`output`] exports to JSON or tab-delimited text
/// - [`session`] runs the interactive browse loop against a [`session::Console`]
///
/// ## Example
///
/// ```rust,no_run
/// use fuzzyfont_core::catalog::{classify_catalog, load_catalog, LoadOptions};
/// use fuzzyfont_core::category::Category;
/// use fuzzyfont_core::classify::Classifier;
/// use fuzzyfont_core::discovery::{system_font_roots, PathDiscovery};
/// use fuzzyfont_core::metadata::FontFileMetadata;
/// use fuzzyfont_core::query::Query;
///
/// let discovery = PathDiscovery::new(system_font_roots()?);
/// let raw = load_catalog(&discovery, &FontFileMetadata, &LoadOptions::default())?;
/// let classifier: Classifier = Classifier::default();
/// let fonts = classify_catalog(&raw, &classifier);
///
/// let mono = Query::new().with_categories([Category::Mono]).apply(&fonts);
/// for font in mono {
///     println!("{}\t{}", font.name, font.path.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub mod catalog;
pub mod category;
pub mod classify;
pub mod discovery;
pub mod metadata;
pub mod output;
pub mod pager;
pub mod query;
pub mod session;
pub mod stats;

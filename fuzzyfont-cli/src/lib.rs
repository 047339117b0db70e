//! fuzzyfont CLI

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use log::debug;

use fuzzyfont_core::catalog::{classify_catalog, load_catalog, FontRecord, LoadOptions};
use fuzzyfont_core::category::{Category, CategorySet};
use fuzzyfont_core::classify::Classifier;
use fuzzyfont_core::discovery::{system_font_roots, PathDiscovery};
use fuzzyfont_core::metadata::FontFileMetadata;
use fuzzyfont_core::output::{export_fonts, write_json_pretty};
use fuzzyfont_core::pager::DEFAULT_PAGE_SIZE;
use fuzzyfont_core::query::Query;
use fuzzyfont_core::session::Session;
use fuzzyfont_core::stats::compute_stats;

pub mod render;
pub mod terminal;

use render::{apply_color, write_font_table, write_stats_table, AnsiColor};
use terminal::TerminalConsole;

/// Environment variable holding the `env_logger` filter.
pub const LOG_ENV: &str = "FUZZYFONT_LOG";

/// List and filter the fonts installed on this machine.
#[derive(Debug, Parser)]
#[command(
    name = "fuzzyfont",
    about = "Font explorer: list, classify, filter, and export installed fonts"
)]
pub struct Cli {
    /// Show only monospace fonts
    #[arg(long, action = ArgAction::SetTrue)]
    mono: bool,

    /// Show only serif fonts
    #[arg(long, action = ArgAction::SetTrue)]
    serif: bool,

    /// Show only sans-serif fonts
    #[arg(long, action = ArgAction::SetTrue)]
    sans: bool,

    /// Show display/decorative fonts
    #[arg(long, action = ArgAction::SetTrue)]
    display: bool,

    /// Show symbol/emoji fonts
    #[arg(long, action = ArgAction::SetTrue)]
    symbol: bool,

    /// Search for a font name (case-insensitive substring)
    #[arg(long, value_hint = ValueHint::Other)]
    search: Option<String>,

    /// Export font list to file (.json for JSON, anything else for tab-delimited text)
    #[arg(long, value_hint = ValueHint::FilePath)]
    export: Option<PathBuf>,

    /// Limit number of fonts shown
    #[arg(long)]
    limit: Option<usize>,

    /// Show statistics (counts by category)
    #[arg(long, action = ArgAction::SetTrue)]
    stats: bool,

    /// Open the interactive browser; filter/search/limit flags are ignored
    #[arg(long, action = ArgAction::SetTrue)]
    tui: bool,

    /// Font directories to scan instead of the system ones
    #[arg(long = "font-dir", value_hint = ValueHint::DirPath)]
    font_dirs: Vec<PathBuf>,

    /// Follow symlinks while walking font directories
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Number of threads used to read font files
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    /// Rows per page in the interactive browser
    #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Print the result as a JSON array instead of a table
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with_all = ["stats", "tui"])]
    json: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl Cli {
    fn wanted_categories(&self) -> CategorySet {
        [
            (self.mono, Category::Mono),
            (self.serif, Category::Serif),
            (self.sans, Category::Sans),
            (self.display, Category::Display),
            (self.symbol, Category::Symbol),
        ]
        .into_iter()
        .filter_map(|(on, category)| on.then_some(category))
        .collect()
    }

    fn font_roots(&self) -> Result<Vec<PathBuf>> {
        if self.font_dirs.is_empty() {
            system_font_roots()
        } else {
            Ok(self.font_dirs.clone())
        }
    }
}

/// Parse CLI args and run batch or interactive mode.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let fonts = load_fonts(&cli)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if cli.tui {
        let stdin = io::stdin();
        let clear = handle.is_terminal();
        let mut console = TerminalConsole::new(stdin.lock(), handle, use_color).clear_screen(clear);
        return Session::new(&fonts, cli.page_size).run(&mut console);
    }

    let stderr = io::stderr();
    run_batch(&cli, &fonts, &mut handle, &mut stderr.lock(), use_color)
}

fn load_fonts(cli: &Cli) -> Result<Vec<FontRecord>> {
    let roots = cli.font_roots()?;
    debug!("scanning font roots: {roots:?}");
    let discovery = PathDiscovery::new(roots).follow_symlinks(cli.follow_symlinks);
    let opts = LoadOptions { jobs: cli.jobs };
    let raw = load_catalog(&discovery, &FontFileMetadata, &opts)?;
    let classifier: Classifier = Classifier::default();
    Ok(classify_catalog(&raw, &classifier))
}

/// Select fonts for one-shot mode: category filter, then search, then limit.
fn select_fonts(cli: &Cli, fonts: &[FontRecord]) -> Vec<FontRecord> {
    let query = Query::new()
        .with_categories(cli.wanted_categories())
        .with_search(cli.search.as_deref().unwrap_or_default());
    let mut selected = query.apply(fonts);

    if let Some(limit) = cli.limit.filter(|l| *l > 0) {
        selected.truncate(limit);
    }
    selected
}

fn run_batch(
    cli: &Cli,
    fonts: &[FontRecord],
    mut out: impl Write,
    mut err: impl Write,
    color: bool,
) -> Result<()> {
    let selected = select_fonts(cli, fonts);

    if selected.is_empty() {
        let msg = "No fonts found matching your criteria.";
        writeln!(out, "{}", apply_color(msg, color, AnsiColor::Red))?;
        return Ok(());
    }

    if cli.json {
        write_json_pretty(&selected, &mut out)?;
        writeln!(out)?;
    } else {
        write_font_table(&selected, 0, None, &mut out, color)?;
    }

    if cli.stats {
        write_stats_table(&compute_stats(&selected), &mut out, color)?;
    }

    if let Some(path) = &cli.export {
        // Keep stdout parseable when it carries JSON.
        let status: &mut dyn Write = if cli.json { &mut err } else { &mut out };
        match export_fonts(&selected, path) {
            Ok(summary) => {
                let msg = format!(
                    "Exported {} fonts to {}",
                    summary.count,
                    summary.path.display()
                );
                writeln!(status, "{}", apply_color(&msg, color, AnsiColor::Green))?;
            }
            Err(e) => {
                let msg = format!("Failed to export fonts: {e:#}");
                writeln!(status, "{}", apply_color(&msg, color, AnsiColor::Red))?;
            }
        }
    }

    Ok(())
}

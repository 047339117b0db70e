//! Export writers for fuzzyfont-core

use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::catalog::FontRecord;
use crate::category::Category;

/// One exported font: categories are sorted alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub name: String,
    pub path: String,
    pub categories: Vec<Category>,
}

impl From<&FontRecord> for ExportRecord {
    fn from(font: &FontRecord) -> Self {
        let mut categories: Vec<Category> = font.categories.iter().copied().collect();
        categories.sort_by_key(|c| c.as_str());
        Self {
            name: font.name.clone(),
            path: font.path.display().to_string(),
            categories,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Text,
}

impl ExportFormat {
    /// `.json` (any case) selects JSON; everything else is tab-delimited text.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Text,
        }
    }
}

/// What an export wrote and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub count: usize,
    pub format: ExportFormat,
}

/// Write fonts as a prettified JSON array.
pub fn write_json_pretty(fonts: &[FontRecord], mut w: impl Write) -> Result<()> {
    let records: Vec<ExportRecord> = fonts.iter().map(ExportRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)?;
    w.write_all(json.as_bytes())?;
    Ok(())
}

/// Write fonts as `name<TAB>cat,cat<TAB>path` lines.
pub fn write_text(fonts: &[FontRecord], mut w: impl Write) -> Result<()> {
    for font in fonts {
        let record = ExportRecord::from(font);
        let tags: Vec<&str> = record.categories.iter().map(|c| c.as_str()).collect();
        writeln!(w, "{}\t{}\t{}", record.name, tags.join(","), record.path)?;
    }
    Ok(())
}

/// Export to `path`, choosing the format from its extension and creating parent directories.
pub fn export_fonts(fonts: &[FontRecord], path: impl AsRef<Path>) -> Result<ExportSummary> {
    let path = resolve_export_path(path.as_ref())?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let format = ExportFormat::for_path(&path);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Json => write_json_pretty(fonts, &mut writer)?,
        ExportFormat::Text => write_text(fonts, &mut writer)?,
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;

    info!("exported {} fonts to {}", fonts.len(), path.display());
    Ok(ExportSummary {
        path,
        count: fonts.len(),
        format,
    })
}

/// Parse a JSON export back into records.
pub fn read_export(path: impl AsRef<Path>) -> Result<Vec<ExportRecord>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let records = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(records)
}

fn resolve_export_path(raw: &Path) -> Result<PathBuf> {
    let expanded = expand_home(raw);
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    let cwd = env::current_dir().context("resolving current directory")?;
    Ok(cwd.join(expanded))
}

fn expand_home(raw: &Path) -> PathBuf {
    let Ok(rest) = raw.strip_prefix("~") else {
        return raw.to_path_buf();
    };
    match env::var_os("HOME").or_else(|| env::var_os("USERPROFILE")) {
        Some(home) => PathBuf::from(home).join(rest),
        None => raw.to_path_buf(),
    }
}

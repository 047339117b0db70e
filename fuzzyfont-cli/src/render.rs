//! Plain-text tables and panels with optional ANSI colour.

use std::io::Write;

use anyhow::Result;

use fuzzyfont_core::catalog::FontRecord;
use fuzzyfont_core::category::{sorted_names, Category};
use fuzzyfont_core::session::{Notice, Severity};
use fuzzyfont_core::stats::FontStats;

const INDEX_WIDTH: usize = 6;
const NAME_WIDTH_MAX: usize = 48;
const CATEGORY_WIDTH_MAX: usize = 32;

#[derive(Copy, Clone)]
pub(crate) enum AnsiColor {
    Cyan,
    Yellow,
    Green,
    Red,
    Magenta,
    Dim,
    Bold,
}

pub(crate) fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
        AnsiColor::Red => "31",
        AnsiColor::Magenta => "35",
        AnsiColor::Dim => "2",
        AnsiColor::Bold => "1",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text)
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>, header: &str, max: usize) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
        .clamp(0, max)
}

/// Render `fonts[start..start + limit]` as a numbered table; `None` shows every row.
pub fn write_font_table(
    fonts: &[FontRecord],
    start: usize,
    limit: Option<usize>,
    mut w: impl Write,
    color: bool,
) -> Result<()> {
    let end = match limit {
        Some(limit) => start.saturating_add(limit).min(fonts.len()),
        None => fonts.len(),
    };
    let start = start.min(end);
    let subset = &fonts[start..end];

    let rows: Vec<(String, &str, String, String)> = subset
        .iter()
        .enumerate()
        .map(|(i, font)| {
            (
                (start + i + 1).to_string(),
                font.name.as_str(),
                sorted_names(&font.categories).join(", "),
                font.path.display().to_string(),
            )
        })
        .collect();

    let name_width = column_width(rows.iter().map(|r| r.1), "Font Name", NAME_WIDTH_MAX);
    let cat_width = column_width(rows.iter().map(|r| r.2.as_str()), "Categories", CATEGORY_WIDTH_MAX);

    let title = format!("Available Fonts ({}) - showing {}", fonts.len(), subset.len());
    writeln!(w, "{}", apply_color(&title, color, AnsiColor::Bold))?;
    let header = format!(
        "{}  {}  {}  File Path",
        pad("#", INDEX_WIDTH),
        pad("Font Name", name_width),
        pad("Categories", cat_width)
    );
    writeln!(w, "{}", apply_color(&header, color, AnsiColor::Bold))?;

    for (index, name, cats, path) in rows {
        writeln!(
            w,
            "{}  {}  {}  {}",
            apply_color(&pad(&index, INDEX_WIDTH), color, AnsiColor::Dim),
            apply_color(&pad(name, name_width), color, AnsiColor::Cyan),
            apply_color(&pad(&cats, cat_width), color, AnsiColor::Yellow),
            apply_color(&path, color, AnsiColor::Dim),
        )?;
    }

    Ok(())
}

/// Per-category counts with examples, followed by a total row.
pub fn write_stats_table(stats: &FontStats, mut w: impl Write, color: bool) -> Result<()> {
    let rows: Vec<(&str, String, String)> = Category::ALL
        .iter()
        .map(|category| {
            let examples = stats.examples(*category);
            let examples = if examples.is_empty() {
                "-".to_string()
            } else {
                examples.join(", ")
            };
            (category.as_str(), stats.count(*category).to_string(), examples)
        })
        .chain(std::iter::once(("total", stats.total.to_string(), String::new())))
        .collect();

    let cat_width = column_width(rows.iter().map(|r| r.0), "Category", 16);
    let count_width = column_width(rows.iter().map(|r| r.1.as_str()), "Count", 10);

    writeln!(w, "{}", apply_color("Font Statistics", color, AnsiColor::Bold))?;
    let header = format!(
        "{}  {:>count_width$}  Examples",
        pad("Category", cat_width),
        "Count"
    );
    writeln!(w, "{}", apply_color(&header, color, AnsiColor::Bold))?;

    for (category, count, examples) in rows {
        let line = format!(
            "{}  {}  {}",
            apply_color(&pad(category, cat_width), color, AnsiColor::Cyan),
            apply_color(&format!("{:>count_width$}", count), color, AnsiColor::Green),
            apply_color(&examples, color, AnsiColor::Magenta),
        );
        writeln!(w, "{}", line.trim_end())?;
    }

    Ok(())
}

/// A titled box around `lines`.
pub fn write_panel(title: &str, lines: &[String], mut w: impl Write, color: bool) -> Result<()> {
    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count() + 2))
        .max()
        .unwrap_or(0);

    let rule = "─".repeat(inner.saturating_sub(title.chars().count() + 1));
    writeln!(w, "┌─ {} {}┐", apply_color(title, color, AnsiColor::Bold), rule)?;
    for line in lines {
        writeln!(w, "│ {} │", pad(line, inner))?;
    }
    writeln!(w, "└{}┘", "─".repeat(inner + 2))?;
    Ok(())
}

/// Numbered category toggles with an explicit on/off marker.
pub fn write_filter_menu(toggles: &[(Category, bool)], mut w: impl Write, color: bool) -> Result<()> {
    writeln!(w)?;
    writeln!(w, "Toggle filters (type number to toggle, Enter to return):")?;
    for (i, (category, on)) in toggles.iter().enumerate() {
        let (marker, code) = if *on {
            ("[x]", AnsiColor::Green)
        } else {
            ("[ ]", AnsiColor::Red)
        };
        let label = format!("{marker} {category}");
        writeln!(w, "  {}. {}", i + 1, apply_color(&label, color, code))?;
    }
    writeln!(w, "  0. Done")?;
    Ok(())
}

pub fn write_notice(notice: &Notice, mut w: impl Write, color: bool) -> Result<()> {
    let code = match notice.severity {
        Severity::Info => AnsiColor::Bold,
        Severity::Success => AnsiColor::Green,
        Severity::Hint => AnsiColor::Dim,
        Severity::Error => AnsiColor::Red,
    };
    writeln!(w, "{}", apply_color(&notice.message, color, code))?;
    Ok(())
}

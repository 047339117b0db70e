//! Name-table reading for fuzzyfont-core
//!
//! Only the `name` table is consulted; glyph data is never touched.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use read_fonts::tables::name::{Name, NameId};
use read_fonts::{FontRef, TableProvider};

/// Source of the human-facing names stored inside a font file.
pub trait FontMetadataSource {
    /// Name shown in listings.
    fn font_name(&self, path: &Path) -> Result<String>;

    /// Declared family name, used by the classifier's metadata stage.
    fn family_name(&self, path: &Path) -> Result<String>;
}

/// Reads names straight from the font file. Collections use their first face.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontFileMetadata;

const DISPLAY_NAME_IDS: [NameId; 3] = [
    NameId::FAMILY_NAME,
    NameId::TYPOGRAPHIC_FAMILY_NAME,
    NameId::FULL_NAME,
];

const FAMILY_NAME_IDS: [NameId; 2] = [NameId::TYPOGRAPHIC_FAMILY_NAME, NameId::FAMILY_NAME];

// Windows en-US and Mac/Unicode English.
const ENGLISH_LANGUAGE_IDS: [u16; 2] = [0x0409, 0];

impl FontMetadataSource for FontFileMetadata {
    fn font_name(&self, path: &Path) -> Result<String> {
        read_name(path, &DISPLAY_NAME_IDS)
    }

    fn family_name(&self, path: &Path) -> Result<String> {
        read_name(path, &FAMILY_NAME_IDS)
    }
}

fn read_name(path: &Path, preference: &[NameId]) -> Result<String> {
    let data = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    let font = match FontRef::fonts(&data).next() {
        Some(font) => font.with_context(|| format!("parsing font {}", path.display()))?,
        None => return Err(anyhow!("no font faces in {}", path.display())),
    };
    let name_table = font
        .name()
        .with_context(|| format!("reading name table of {}", path.display()))?;

    preference
        .iter()
        .find_map(|id| find_record(&name_table, *id))
        .ok_or_else(|| anyhow!("no usable name records in {}", path.display()))
}

fn find_record(name_table: &Name, wanted: NameId) -> Option<String> {
    let data = name_table.string_data();
    let mut fallback = None;

    for record in name_table.name_record() {
        if !record.is_unicode() || record.name_id() != wanted {
            continue;
        }
        let Ok(entry) = record.string(data) else {
            continue;
        };
        let rendered = entry.to_string().trim().to_string();
        if rendered.is_empty() {
            continue;
        }
        if ENGLISH_LANGUAGE_IDS.contains(&record.language_id()) {
            return Some(rendered);
        }
        fallback.get_or_insert(rendered);
    }

    fallback
}

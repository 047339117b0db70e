//! Finding candidate font files under a set of root directories.
//!
//! Roots are either given explicitly, listed in `FUZZYFONT_FONT_DIRS`, or taken
//! from the usual per-platform install locations.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use log::debug;
use walkdir::{DirEntry, WalkDir};

/// Environment variable that replaces the platform font directories.
pub const FONT_DIRS_ENV: &str = "FUZZYFONT_FONT_DIRS";

/// Extensions (lowercase) of the sfnt flavours whose `name` table we can read.
const FONT_EXTENSIONS: [&str; 4] = ["ttf", "otf", "ttc", "otc"];

/// A file that looks like a font by its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSourceRef {
    pub path: PathBuf,
}

/// Source of candidate font files for the catalog loader.
pub trait FontDiscovery {
    fn discover(&self) -> Result<Vec<FontSourceRef>>;
}

/// Walks every root recursively. Symlinks are left alone unless asked for.
#[derive(Debug, Clone)]
pub struct PathDiscovery {
    roots: Vec<PathBuf>,
    follow_symlinks: bool,
}

impl PathDiscovery {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    fn walk_root(&self, root: &Path, found: &mut Vec<FontSourceRef>) {
        let fonts = WalkDir::new(root)
            .follow_links(self.follow_symlinks)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!("ignoring entry under {}: {err}", root.display());
                    None
                }
            })
            .filter(is_font_entry)
            .map(|entry| FontSourceRef {
                path: entry.into_path(),
            });
        found.extend(fonts);
    }
}

impl FontDiscovery for PathDiscovery {
    fn discover(&self) -> Result<Vec<FontSourceRef>> {
        if let Some(missing) = self.roots.iter().find(|root| !root.exists()) {
            bail!("cannot scan {}: no such directory", missing.display());
        }

        let mut found = Vec::new();
        for root in &self.roots {
            self.walk_root(root, &mut found);
        }
        Ok(found)
    }
}

fn is_font_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && is_font(entry.path())
}

pub(crate) fn is_font(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Directories to scan when none are given on the command line.
///
/// `FUZZYFONT_FONT_DIRS` (`:` or `;` separated) wins over the platform list.
/// Entries that do not exist are dropped; an empty result is an error.
pub fn system_font_roots() -> Result<Vec<PathBuf>> {
    let (source, candidates): (&str, Vec<PathBuf>) = match env::var(FONT_DIRS_ENV) {
        Ok(raw) => (
            FONT_DIRS_ENV,
            raw.split([':', ';'])
                .filter(|part| !part.is_empty())
                .map(PathBuf::from)
                .collect(),
        ),
        Err(_) => ("platform defaults", platform_font_dirs()),
    };

    let mut roots: Vec<PathBuf> = candidates.into_iter().filter(|dir| dir.is_dir()).collect();
    roots.sort();
    roots.dedup();

    if roots.is_empty() {
        bail!("no font directory from {source} exists on this machine");
    }
    Ok(roots)
}

fn platform_font_dirs() -> Vec<PathBuf> {
    let home = env::var_os("HOME").map(PathBuf::from);
    let mut dirs = Vec::new();

    if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.extend(home.iter().map(|h| h.join("Library/Fonts")));
    } else if cfg!(target_os = "windows") {
        dirs.extend(env::var_os("SYSTEMROOT").map(|root| PathBuf::from(root).join("Fonts")));
        dirs.extend(
            env::var_os("LOCALAPPDATA")
                .map(|local| PathBuf::from(local).join("Microsoft/Windows/Fonts")),
        );
    } else {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = &home {
            dirs.push(home.join(".local/share/fonts"));
            dirs.push(home.join(".fonts"));
        }
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::is_font;
    use super::FontDiscovery;
    use super::PathDiscovery;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn recognises_font_extensions() {
        assert!(is_font("/A/B/font.ttf".as_ref()));
        assert!(is_font("/A/B/font.OTF".as_ref()));
        assert!(is_font("/A/B/family.ttc".as_ref()));
        assert!(!is_font("/A/B/font.woff2".as_ref()));
        assert!(!is_font("/A/B/font".as_ref()));
    }

    #[test]
    fn missing_root_names_the_directory() {
        let err = PathDiscovery::new(["/nonexistent/fuzzyfont/fonts"])
            .discover()
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fuzzyfont/fonts"));
    }

    #[test]
    fn discovers_nested_fonts() {
        let tmp = tempdir().expect("tempdir");
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).expect("mkdir");
        let font_path = nested.join("sample.ttf");
        fs::write(&font_path, b"").expect("touch font");

        let discovery = PathDiscovery::new([tmp.path()]);
        let fonts = discovery.discover().expect("discover");

        assert!(fonts.iter().any(|f| f.path == font_path));
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_when_enabled() {
        use std::os::unix::fs::symlink;

        let tmp = tempdir().expect("tempdir");
        let real_dir = tmp.path().join("real");
        let link_dir = tmp.path().join("link");
        fs::create_dir_all(&real_dir).expect("mkdir real");
        fs::write(real_dir.join("linked.otf"), b"").expect("touch font");
        symlink(&real_dir, &link_dir).expect("symlink");

        let discovery = PathDiscovery::new([&link_dir]).follow_symlinks(true);
        let fonts = discovery.discover().expect("discover");

        assert!(fonts.iter().any(|f| f.path.ends_with("linked.otf")));
    }
}

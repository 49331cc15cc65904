use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory listings are sorted by name so that per-video ordinals and
/// scan order are reproducible across platforms and filesystems.
pub fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();

    entries.sort();
    Ok(entries)
}

/// Non-dotfile subdirectories of `dir`, sorted. One per category label,
/// background group, or output class depending on the caller.
pub fn class_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.is_dir() && !is_dotfile(path))
        .collect())
}

/// Movie container files directly inside `dir`, sorted. The position of a
/// video in this listing is its naming ordinal.
pub fn movie_files(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.is_file() && has_extension(path, &[super::walker::MOVIE_EXT]))
        .collect())
}

pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            extensions.iter().any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn is_dotfile(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.starts_with('.'))
}

/// Last path component as a plain string, for output naming.
pub fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

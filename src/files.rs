use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Return true if the given path's extension matches any of the configured
/// file_extensions patterns ("*.mp3", "mp3", ".mp3"), case-insensitive.
fn path_matches_extensions(path: &Path, exts: &[String]) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(s) => s.to_ascii_lowercase(),
        None => return false,
    };
    exts.iter().any(|pat| {
        let p = pat.trim();
        let p = p.strip_prefix("*.").or_else(|| p.strip_prefix('.')).unwrap_or(p);
        !p.is_empty() && ext == p.to_ascii_lowercase()
    })
}

/// All audio files under `dir`, recursively, sorted by full path.
///
/// The order is what positional matching against a tracklist relies on, so it must
/// stay lexicographic.
pub fn list_files(dir: &Path, file_extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| path_matches_extensions(p, file_extensions))
        .collect();
    files.sort();
    files
}

/// Remove directories under `root` (and `root` itself) left empty after a move.
/// Returns how many were removed.
pub fn prune_empty_dirs(root: &Path) -> std::io::Result<usize> {
    let mut removed = 0;
    for entry in WalkDir::new(root).contents_first(true).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_dir() {
            continue;
        }
        let empty = std::fs::read_dir(entry.path())?.next().is_none();
        if empty {
            std::fs::remove_dir(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

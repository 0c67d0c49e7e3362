use crate::error::{Error, Result};
use crate::merge::merge;
use crate::models::Release;
use crate::options::Options;
use crate::reader::read_metadata;
use crate::tags::{Field, TagStore};
use crate::template::{render_filename, render_path};
use crate::tracklist::flatten;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Decide what a per-file failure means for the run: under `ignore` it is logged and
/// the run goes on, otherwise it ends the run. Files handled so far stay written.
fn per_file(path: &Path, result: Result<()>, options: &Options) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e @ Error::RenderIndex { .. }) => Err(Error::for_track(path, e)),
        Err(e) if options.ignore => {
            warn!("{}: {}; skipping", path.display(), e);
            Ok(false)
        }
        Err(e) => Err(Error::for_track(path, e)),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    matches!((a.canonicalize(), b.canonicalize()), (Ok(a), Ok(b)) if a == b)
}

fn log_planned<S: TagStore>(path: &Path, tags: &S) {
    for field in Field::ALL {
        if let Some(values) = tags.values(field) {
            info!("{}: {} = {}", path.display(), field, values.join("; "));
        }
    }
}

/// Tag `files` with `release`, matching flattened tracks to files by position.
///
/// A count mismatch aborts before anything is opened unless `options.ignore` is
/// set, in which case the shorter side decides how many files are tagged. Returns
/// the number of files tagged.
pub fn apply_metadata<S, F>(release: &Release, files: &[PathBuf], options: &Options, mut open: F) -> Result<usize>
where
    S: TagStore,
    F: FnMut(&Path) -> Result<S>,
{
    let tracks = flatten(&release.tracklist, options.skip.subtrack);
    if tracks.len() != files.len() {
        let err = Error::CountMismatch { expected: tracks.len(), found: files.len() };
        if !options.ignore {
            return Err(err);
        }
        warn!("{}", err.to_string().trim_end_matches(" Aborting."));
    }

    let mut tagged = 0;
    for (n, (track, path)) in tracks.iter().zip(files).enumerate() {
        let result = open(path).and_then(|mut tags| {
            merge(release, track, n + 1, &mut tags, &options.skip);
            if options.dry {
                log_planned(path, &tags);
                Ok(())
            } else {
                debug!("writing tags to {}", path.display());
                tags.persist()
            }
        });
        if per_file(path, result, options)? {
            tagged += 1;
        }
    }
    info!("tagged {} of {} files{}", tagged, files.len(), if options.dry { " (dry run)" } else { "" });
    Ok(tagged)
}

/// Copy tags from one file set to another by rebuilding a release from the source
/// tags and applying it to the destination. Unreadable source files follow the same
/// per-file policy as destination files; with none left there is nothing to copy.
pub fn copy_metadata<S, F>(
    source_dir: &Path,
    source_files: &[PathBuf],
    dest_files: &[PathBuf],
    options: &Options,
    mut open: F,
) -> Result<usize>
where
    S: TagStore,
    F: FnMut(&Path) -> Result<S>,
{
    let mut sources = Vec::with_capacity(source_files.len());
    for path in source_files {
        let result = open(path).map(|tags| sources.push(tags));
        per_file(path, result, options)?;
    }
    if sources.is_empty() {
        return Err(Error::MissingSourceFiles { dir: source_dir.to_path_buf() });
    }
    let release = read_metadata(&sources);
    debug!("read {} tracks from {}", release.tracklist.len(), source_dir.display());
    apply_metadata(&release, dest_files, options, open)
}

/// Move every file of `files` to the location `template` renders from its own tags.
///
/// Destinations are computed relative to `root`'s parent; a relative `root` is
/// resolved first. A file whose destination already exists, or was already claimed
/// by an earlier file of the run, fails instead of replacing it. After the moves,
/// emptied directories under `root` are removed. Returns the planned destination of
/// every file that was handled.
pub fn rename_files<S, F>(root: &Path, files: &[PathBuf], template: &str, options: &Options, mut open: F) -> Result<Vec<PathBuf>>
where
    S: TagStore,
    F: FnMut(&Path) -> Result<S>,
{
    let root = if root.is_absolute() { root.to_path_buf() } else { root.canonicalize()? };
    let root = root.as_path();
    let mut destinations = Vec::with_capacity(files.len());
    let mut claimed = HashSet::new();
    let mut roots = BTreeSet::new();

    for path in files {
        let result = open(path).and_then(|tags| {
            let (directory, destination_root) = render_path(root, &tags, template)?;
            let destination = render_filename(path, &directory, &tags, template)?;
            let moves = destination != *path && !same_file(path, &destination);
            if claimed.contains(&destination) || (moves && destination.exists()) {
                return Err(Error::DestinationExists { path: destination });
            }
            info!("{} -> {}", path.display(), destination.display());
            if !options.dry && moves {
                std::fs::create_dir_all(&directory)?;
                std::fs::rename(path, &destination)?;
            }
            roots.insert(destination_root);
            claimed.insert(destination.clone());
            destinations.push(destination);
            Ok(())
        });
        per_file(path, result, options)?;
    }

    if !options.dry && !roots.contains(root) && root.exists() {
        let removed = crate::files::prune_empty_dirs(root)?;
        debug!("removed {} empty directories under {}", removed, root.display());
    }
    if roots.len() > 1 {
        warn!("files of {} went to {} different directories", root.display(), roots.len());
    }
    Ok(destinations)
}

use crate::error::Error;
use crate::naming::ARCHIVE_EXTENSION;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Fail unless `root` exists and is a directory.
pub fn ensure_root_dir(root: &Path) -> Result<(), Error> {
    match root.metadata() {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::invalid_input(root, "not a directory")),
        Err(err) => Err(Error::invalid_input(root, err.to_string())),
    }
}

/// Immediate child directories of `root`, sorted by name. Never descends
/// further. Symlinked directories are not followed.
pub fn list_child_directories(root: &Path) -> Result<Vec<PathBuf>, Error> {
    ensure_root_dir(root)?;

    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    debug!("{} child directories under {}", dirs.len(), root.display());
    Ok(dirs)
}

/// `*.7z` files under `root`, in walk order with siblings sorted by name.
/// Only direct children unless `recursive` is set.
pub fn list_archive_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, Error> {
    ensure_root_dir(root)?;

    let pattern = archive_pattern().map_err(|e| Error::invalid_input(root, e.to_string()))?;
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut archives = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matched = pattern.matches_with(&entry.file_name().to_string_lossy(), options);
        if matched {
            archives.push(entry.into_path());
        }
    }

    debug!(
        "{} archives under {} (recursive: {})",
        archives.len(),
        root.display(),
        recursive
    );
    Ok(archives)
}

fn archive_pattern() -> Result<Pattern, glob::PatternError> {
    Pattern::new(&format!("*.{}", Pattern::escape(ARCHIVE_EXTENSION)))
}

use crate::engine::{EngineLocation, ToolOutput, ToolRunner};
use crate::error::Error;
use crate::naming::{archive_file_name, resolve_base_name};
use crate::timestamp::{timestamp_tag, TagPrecision};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Maximum compression, native 7z container, and every timestamp plus the
/// file attributes stored for each entry.
pub const CREATE_FLAGS: [&str; 6] = ["-mx=9", "-t7z", "-mtm=on", "-mtc=on", "-mta=on", "-mtr=on"];

/// Everything needed to turn one directory into one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveJob {
    pub source: PathBuf,
    pub destination_dir: PathBuf,
    pub base_name: String,
    pub timestamp: Option<TagPrecision>,
    pub suffix: Option<String>,
}

impl ArchiveJob {
    pub fn new(
        source: &Path,
        destination_dir: &Path,
        name_override: Option<&str>,
        timestamp: Option<TagPrecision>,
        suffix: Option<&str>,
    ) -> Result<Self, Error> {
        Ok(Self {
            source: source.to_path_buf(),
            destination_dir: destination_dir.to_path_buf(),
            base_name: resolve_base_name(name_override, source)?,
            timestamp,
            suffix: suffix.map(str::to_string),
        })
    }

    /// Full destination path. The timestamp, if any, is taken now.
    pub fn destination_path(&self) -> PathBuf {
        let tag = self.timestamp.map(timestamp_tag);
        self.destination_dir.join(archive_file_name(
            &self.base_name,
            tag.as_deref(),
            self.suffix.as_deref(),
        ))
    }
}

/// Resolve the folder passed to a one-shot archive. Only paths without a
/// final name ("." or "..") are canonicalized, so the usual case keeps the
/// path as typed (no `\\?\` verbatim prefix on Windows).
pub fn resolve_single_source(source: &Path) -> Result<PathBuf, Error> {
    if source.file_name().is_some() {
        return Ok(source.to_path_buf());
    }
    Ok(source.canonicalize()?)
}

/// Default output folder for a one-shot archive: next to the source.
pub fn sibling_destination(source: &Path) -> Result<PathBuf, Error> {
    match source.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(Error::invalid_input(
            source,
            "folder has no parent to write the archive into",
        )),
    }
}

pub fn create_args(destination: &Path, source: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(CREATE_FLAGS.len() + 3);
    args.push("a".into());
    args.extend(CREATE_FLAGS.iter().map(OsString::from));
    args.push(destination.into());
    args.push(source.into());
    args
}

/// Compress `source` into the archive at `destination`. Blocks until 7-Zip
/// exits; overwrite behavior is whatever 7-Zip does with an existing file.
pub fn archive_directory(
    engine: &EngineLocation,
    runner: &dyn ToolRunner,
    source: &Path,
    destination: &Path,
) -> Result<ToolOutput, Error> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let output = runner.run(engine.executable(), &create_args(destination, source))?;

    if !output.success() {
        warn!(
            "7-Zip failed archiving {} -> {}",
            source.display(),
            destination.display()
        );
        return Err(Error::ArchiveCreation {
            source_dir: source.to_path_buf(),
            destination: destination.to_path_buf(),
            diagnostic: output.diagnostic(),
        });
    }

    info!("Archived {} -> {}", source.display(), destination.display());
    Ok(output)
}

/// Run an [`ArchiveJob`], returning the archive path on success.
pub fn run_archive_job(
    engine: &EngineLocation,
    runner: &dyn ToolRunner,
    job: &ArchiveJob,
) -> Result<PathBuf, Error> {
    let destination = job.destination_path();
    archive_directory(engine, runner, &job.source, &destination)?;
    Ok(destination)
}

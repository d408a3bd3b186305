use crate::engine::{EngineLocation, ToolOutput, ToolRunner};
use crate::error::Error;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Which form of `7z t` to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    /// `7z t <archive>`
    Archive,
    /// `7z t <archive> * -r`, explicitly testing every entry recursively.
    AllEntries,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyJob {
    pub archive: PathBuf,
    pub mode: TestMode,
}

pub fn test_args(archive: &Path, mode: TestMode) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["t".into(), archive.into()];
    if mode == TestMode::AllEntries {
        args.push("*".into());
        args.push("-r".into());
    }
    args
}

/// Test one archive's integrity. Blocks until 7-Zip exits and never
/// touches the archive.
pub fn verify_archive(
    engine: &EngineLocation,
    runner: &dyn ToolRunner,
    archive: &Path,
    mode: TestMode,
) -> Result<ToolOutput, Error> {
    let output = runner.run(engine.executable(), &test_args(archive, mode))?;

    if !output.success() {
        warn!("Integrity test failed for {}", archive.display());
        return Err(Error::ArchiveIntegrity {
            archive: archive.to_path_buf(),
            diagnostic: output.diagnostic(),
        });
    }

    info!("Integrity test passed for {}", archive.display());
    Ok(output)
}

pub fn run_verify_job(
    engine: &EngineLocation,
    runner: &dyn ToolRunner,
    job: &VerifyJob,
) -> Result<ToolOutput, Error> {
    verify_archive(engine, runner, &job.archive, job.mode)
}

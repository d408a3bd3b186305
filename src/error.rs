use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("7-Zip executable not found, probed: {}", display_paths(.probed))]
    EngineNotFound { probed: Vec<PathBuf> },

    #[error("Operation cancelled by user")]
    UserAborted,

    #[error(
        "Failed to create archive {} from {}: {}",
        .destination.display(),
        .source_dir.display(),
        .diagnostic
    )]
    ArchiveCreation {
        source_dir: PathBuf,
        destination: PathBuf,
        diagnostic: String,
    },

    #[error("Integrity test failed for {}: {}", .archive.display(), .diagnostic)]
    ArchiveIntegrity { archive: PathBuf, diagnostic: String },

    #[error("Invalid input {}: {}", .path.display(), .reason)]
    InvalidInput { path: PathBuf, reason: String },
}

impl Error {
    /// A declined confirmation is a normal exit, not a failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::UserAborted)
    }

    pub(crate) fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

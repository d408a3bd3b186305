pub mod runner;

use crate::error::Error;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use runner::{ProcessRunner, ToolOutput, ToolRunner};

/// Resolved path of the 7-Zip executable.
///
/// Resolved once per invocation and handed to every operation that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineLocation {
    executable: PathBuf,
}

impl EngineLocation {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Resolve the engine from an explicit override, or the well-known
    /// install locations when no override is configured.
    pub fn resolve(override_path: Option<&Path>) -> Result<Self, Error> {
        match override_path {
            Some(path) => locate_engine(&[path.to_path_buf()]),
            None => locate_engine(&default_candidates()),
        }
    }
}

/// Return the first candidate that exists on disk.
pub fn locate_engine(candidates: &[PathBuf]) -> Result<EngineLocation, Error> {
    for candidate in candidates {
        debug!("Probing for 7-Zip at {}", candidate.display());
        if candidate.is_file() {
            debug!("Found 7-Zip at {}", candidate.display());
            return Ok(EngineLocation::new(candidate.clone()));
        }
    }

    Err(Error::EngineNotFound {
        probed: candidates.to_vec(),
    })
}

/// Well-known install locations, 64-bit before 32-bit.
#[cfg(target_os = "windows")]
pub fn default_candidates() -> Vec<PathBuf> {
    windows_candidates(
        std::env::var("ProgramW6432").ok(),
        std::env::var("ProgramFiles").ok(),
        std::env::var("ProgramFiles(x86)").ok(),
    )
}

/// `ProgramFiles` points at the x86 folder inside a 32-bit process, so the
/// native folder comes from `ProgramW6432` when it is set.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn windows_candidates(
    program_w6432: Option<String>,
    program_files: Option<String>,
    program_files_x86: Option<String>,
) -> Vec<PathBuf> {
    let native = program_w6432
        .or(program_files)
        .unwrap_or_else(|| "C:\\Program Files".to_string());
    let x86 = program_files_x86.unwrap_or_else(|| "C:\\Program Files (x86)".to_string());

    vec![
        Path::new(&native).join("7-Zip").join("7z.exe"),
        Path::new(&x86).join("7-Zip").join("7z.exe"),
    ]
}

#[cfg(not(target_os = "windows"))]
pub fn default_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/local/bin/7z"),
        PathBuf::from("/usr/bin/7z"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn candidates(root: &Path) -> (PathBuf, PathBuf) {
        (
            root.join("Program Files").join("7-Zip").join("7z.exe"),
            root.join("Program Files (x86)").join("7-Zip").join("7z.exe"),
        )
    }

    fn install(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_prefers_64_bit_install() {
        let tmp = tempdir().unwrap();
        let (x64, x86) = candidates(tmp.path());
        install(&x64);
        install(&x86);

        let engine = locate_engine(&[x64.clone(), x86]).unwrap();
        assert_eq!(engine.executable(), x64.as_path());
    }

    #[test]
    fn test_falls_back_to_32_bit_install() {
        let tmp = tempdir().unwrap();
        let (x64, x86) = candidates(tmp.path());
        install(&x86);

        let engine = locate_engine(&[x64, x86.clone()]).unwrap();
        assert_eq!(engine.executable(), x86.as_path());
    }

    #[test]
    fn test_not_found_carries_both_paths() {
        let tmp = tempdir().unwrap();
        let (x64, x86) = candidates(tmp.path());

        match locate_engine(&[x64.clone(), x86.clone()]) {
            Err(Error::EngineNotFound { probed }) => assert_eq!(probed, vec![x64, x86]),
            other => panic!("expected EngineNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_not_an_engine() {
        let tmp = tempdir().unwrap();
        let (x64, _) = candidates(tmp.path());
        fs::create_dir_all(&x64).unwrap();

        assert!(locate_engine(&[x64]).is_err());
    }

    #[test]
    fn test_override_is_the_only_candidate() {
        let tmp = tempdir().unwrap();
        let custom = tmp.path().join("bin").join("7zz");
        install(&custom);

        let engine = EngineLocation::resolve(Some(&custom)).unwrap();
        assert_eq!(engine.executable(), custom.as_path());

        let missing = tmp.path().join("missing").join("7z");
        match EngineLocation::resolve(Some(&missing)) {
            Err(Error::EngineNotFound { probed }) => assert_eq!(probed, vec![missing]),
            other => panic!("expected EngineNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_native_program_files_wins_in_32_bit_process() {
        // Layout seen by a 32-bit process on 64-bit Windows.
        let found = windows_candidates(
            Some("D:\\Apps".to_string()),
            Some("D:\\Apps (x86)".to_string()),
            Some("D:\\Apps (x86)".to_string()),
        );

        assert_eq!(
            found,
            vec![
                Path::new("D:\\Apps").join("7-Zip").join("7z.exe"),
                Path::new("D:\\Apps (x86)").join("7-Zip").join("7z.exe"),
            ]
        );
    }

    #[test]
    fn test_program_files_used_without_w6432() {
        let found = windows_candidates(None, Some("D:\\Apps".to_string()), None);

        assert_eq!(found[0], Path::new("D:\\Apps").join("7-Zip").join("7z.exe"));
        assert_eq!(
            found[1],
            Path::new("C:\\Program Files (x86)").join("7-Zip").join("7z.exe")
        );
    }
}

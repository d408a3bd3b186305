use crate::error::Error;
use std::path::Path;

pub const ARCHIVE_EXTENSION: &str = "7z";

/// Build an archive file name.
///
/// The timestamp, when present, is always the leading token and the suffix
/// always sits right before the extension:
///
/// - `[ts] base.suffix.7z`
/// - `[ts] base.7z`
/// - `base.suffix.7z`
/// - `base.7z`
///
/// Empty `timestamp` or `suffix` values are treated as absent. `base` must
/// be non-empty, see [`resolve_base_name`].
pub fn archive_file_name(base: &str, timestamp: Option<&str>, suffix: Option<&str>) -> String {
    let timestamp = timestamp.filter(|t| !t.is_empty());
    let suffix = suffix.filter(|s| !s.is_empty());

    match (timestamp, suffix) {
        (Some(ts), Some(sfx)) => format!("{} {}.{}.{}", ts, base, sfx, ARCHIVE_EXTENSION),
        (Some(ts), None) => format!("{} {}.{}", ts, base, ARCHIVE_EXTENSION),
        (None, Some(sfx)) => format!("{}.{}.{}", base, sfx, ARCHIVE_EXTENSION),
        (None, None) => format!("{}.{}", base, ARCHIVE_EXTENSION),
    }
}

/// Pick the base name for an archive: the explicit override if given,
/// otherwise the leaf name of the source directory.
pub fn resolve_base_name(name_override: Option<&str>, source: &Path) -> Result<String, Error> {
    if let Some(name) = name_override {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input(source, "archive base name is empty"));
        }
        if name.contains(['/', '\\']) {
            return Err(Error::invalid_input(
                source,
                format!("archive base name '{}' contains a path separator", name),
            ));
        }
        return Ok(name.to_string());
    }

    source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .filter(|f| !f.is_empty())
        .ok_or_else(|| Error::invalid_input(source, "cannot derive an archive name from this path"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "[2024-01-15 14_30_05]";

    #[test]
    fn test_all_four_variants() {
        assert_eq!(
            archive_file_name("Docs", Some(TS), Some("backup")),
            "[2024-01-15 14_30_05] Docs.backup.7z"
        );
        assert_eq!(
            archive_file_name("Docs", Some(TS), None),
            "[2024-01-15 14_30_05] Docs.7z"
        );
        assert_eq!(
            archive_file_name("Docs", None, Some("backup")),
            "Docs.backup.7z"
        );
        assert_eq!(archive_file_name("Docs", None, None), "Docs.7z");
    }

    #[test]
    fn test_empty_parts_count_as_absent() {
        assert_eq!(archive_file_name("Docs", Some(""), Some("")), "Docs.7z");
        assert_eq!(
            archive_file_name("Docs", Some(""), Some("backup")),
            "Docs.backup.7z"
        );
    }

    #[test]
    fn test_base_name_from_leaf() {
        let name = resolve_base_name(None, Path::new("/data/projects/Docs")).unwrap();
        assert_eq!(name, "Docs");
    }

    #[test]
    fn test_base_name_override_wins() {
        let name = resolve_base_name(Some("Reports"), Path::new("/data/Docs")).unwrap();
        assert_eq!(name, "Reports");
    }

    #[test]
    fn test_base_name_rejects_empty_and_separators() {
        assert!(matches!(
            resolve_base_name(Some("  "), Path::new("/data/Docs")),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            resolve_base_name(Some("a/b"), Path::new("/data/Docs")),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            resolve_base_name(None, Path::new("/")),
            Err(Error::InvalidInput { .. })
        ));
    }
}

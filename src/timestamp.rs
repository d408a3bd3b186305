use chrono::{Local, NaiveDateTime};

/// How much of the current time goes into an archive name tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPrecision {
    /// `[YYYY-MM-DD]`, used by the legacy archive flow.
    Date,
    /// `[YYYY-MM-DD HH_mm_ss]`, used when building custom archive names.
    DateTime,
}

impl TagPrecision {
    fn format_str(self) -> &'static str {
        match self {
            TagPrecision::Date => "[%Y-%m-%d]",
            // Colons are not allowed in Windows file names.
            TagPrecision::DateTime => "[%Y-%m-%d %H_%M_%S]",
        }
    }
}

/// Bracketed tag for the current local time.
pub fn timestamp_tag(precision: TagPrecision) -> String {
    format_tag(precision, &Local::now().naive_local())
}

pub fn format_tag(precision: TagPrecision, at: &NaiveDateTime) -> String {
    at.format(precision.format_str()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_date_tag() {
        assert_eq!(format_tag(TagPrecision::Date, &sample()), "[2024-01-15]");
    }

    #[test]
    fn test_date_time_tag() {
        assert_eq!(
            format_tag(TagPrecision::DateTime, &sample()),
            "[2024-01-15 14_30_05]"
        );
    }

    #[test]
    fn test_current_tag_is_filename_safe() {
        let tag = timestamp_tag(TagPrecision::DateTime);
        assert!(tag.starts_with('[') && tag.ends_with(']'));
        let reserved = |c: char| matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
        assert!(!tag.contains(reserved));
    }
}

use std::sync::LazyLock;

use ormigrate_common::{Error, Result};
use regex::Regex;

static FILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,14})_([0-9a-z_\-]+)\.").expect("migration name pattern is valid")
});

/// Which half of a migration a file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationKind {
    Up,
    Down,
}

impl MigrationKind {
    /// Classify a path by its `.up.sql` / `.down.sql` suffix.
    pub fn from_path(path: &str) -> Option<Self> {
        if path.ends_with(".up.sql") {
            Some(Self::Up)
        } else if path.ends_with(".down.sql") {
            Some(Self::Down)
        } else {
            None
        }
    }
}

/// Split a migration file path into `(version, comment)`.
///
/// Only the final path component is inspected, and it must start with
/// `<1-14 digits>_<[0-9a-z_-]+>.`; whatever follows the first dot is ignored.
pub fn extract_migration_name(path: &str) -> Result<(String, String)> {
    let file_name = base_name(path);

    let caps = FILE_NAME_RE
        .captures(file_name)
        .ok_or_else(|| Error::Format(file_name.to_string()))?;

    Ok((caps[1].to_string(), caps[2].to_string()))
}

/// Numeric value of a version string, if it is all digits.
pub fn version_number(name: &str) -> Option<u64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', std::path::MAIN_SEPARATOR])
        .next()
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_version_and_comment() {
        let (name, comment) = extract_migration_name("00001_create_users.up.sql").unwrap();
        assert_eq!(name, "00001");
        assert_eq!(comment, "create_users");
    }

    #[test]
    fn uses_only_the_base_name() {
        let (name, comment) =
            extract_migration_name("db/migrations/nested/20240101120000_add-index.down.sql")
                .unwrap();
        assert_eq!(name, "20240101120000");
        assert_eq!(comment, "add-index");
    }

    #[test]
    fn accepts_any_suffix_after_the_slug() {
        let (name, comment) = extract_migration_name("42_seed_data.rs").unwrap();
        assert_eq!(name, "42");
        assert_eq!(comment, "seed_data");
    }

    #[test]
    fn rejects_names_outside_the_grammar() {
        for bad in [
            "notamigration.txt",
            "1_bad name!.up.sql",
            "_missing_version.up.sql",
            "123456789012345_too_long.up.sql",
            "0001_UpperCase.up.sql",
            "0001_no_dot",
            "0001-dash_first.up.sql",
        ] {
            let err = extract_migration_name(bad).unwrap_err();
            assert!(
                matches!(err, Error::Format(ref f) if f == bad),
                "expected format error for {bad}, got {err:?}"
            );
        }
    }

    #[test]
    fn format_error_names_the_base_file() {
        let err = extract_migration_name("some/dir/oops.up.sql").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported migration name format: \"oops.up.sql\""
        );
    }

    #[test]
    fn classifies_direction_by_suffix() {
        assert_eq!(
            MigrationKind::from_path("1_a.up.sql"),
            Some(MigrationKind::Up)
        );
        assert_eq!(
            MigrationKind::from_path("dir/1_a.down.sql"),
            Some(MigrationKind::Down)
        );
        assert_eq!(MigrationKind::from_path("1_a.sql"), None);
        assert_eq!(MigrationKind::from_path("README.md"), None);
    }

    #[test]
    fn version_numbers_ignore_leading_zeros() {
        assert_eq!(version_number("00010"), Some(10));
        assert_eq!(version_number("99999999999999"), Some(99_999_999_999_999));
        assert_eq!(version_number(""), None);
        assert_eq!(version_number("12a"), None);
    }
}

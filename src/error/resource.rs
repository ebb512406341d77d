//! Resource map errors

use super::ThemeError;

/// Creates a duplicate resource error naming both sources
pub fn duplicate(
    archive_path: impl Into<String>,
    first: impl Into<String>,
    second: impl Into<String>,
) -> ThemeError {
    ThemeError::DuplicateResource {
        archive_path: archive_path.into(),
        first: first.into(),
        second: second.into(),
    }
}

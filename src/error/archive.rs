//! Output container errors

use super::ThemeError;

/// Creates an archive write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> ThemeError {
    ThemeError::ArchiveWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error (loose debug outputs)
pub fn file_write_failed(path: impl Into<String>, reason: impl Into<String>) -> ThemeError {
    ThemeError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

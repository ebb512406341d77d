//! Fragment read and parse errors

use super::ThemeError;

/// Creates a fragment read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> ThemeError {
    ThemeError::FragmentReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a fragment parse failed error
pub fn parse_failed(path: impl Into<String>, line: usize, reason: impl Into<String>) -> ThemeError {
    ThemeError::FragmentParseFailed {
        path: path.into(),
        line,
        reason: reason.into(),
    }
}

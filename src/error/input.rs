//! Input validation errors

use super::ThemeError;

/// Creates an invalid output extension error
pub fn invalid_extension(path: impl Into<String>) -> ThemeError {
    ThemeError::InvalidOutputExtension { path: path.into() }
}

/// Creates an empty theme name error
pub fn empty_name(path: impl Into<String>) -> ThemeError {
    ThemeError::EmptyThemeName { path: path.into() }
}

/// Creates an invalid override key error
pub fn invalid_override(key: impl Into<String>, reason: impl Into<String>) -> ThemeError {
    ThemeError::InvalidOverrideKey {
        key: key.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid include pattern error
pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> ThemeError {
    ThemeError::InvalidIncludePattern {
        pattern: pattern.into(),
        reason: reason.into(),
    }
}

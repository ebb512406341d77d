//! Directory scanning errors

use super::ThemeError;

/// Creates a scan failed error
pub fn failed(path: impl Into<String>, reason: impl Into<String>) -> ThemeError {
    ThemeError::ScanFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a tree without any data directory
pub fn no_data_directories(root: impl Into<String>) -> ThemeError {
    ThemeError::NoDataDirectories { root: root.into() }
}

/// Creates an error for loose files directly under a root that is not a data directory
pub fn orphaned_root_files(root: impl Into<String>, files: &[String]) -> ThemeError {
    ThemeError::OrphanedRootFiles {
        root: root.into(),
        files: files.join(", "),
    }
}

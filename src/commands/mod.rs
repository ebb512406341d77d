//! Command implementations for the theme builder CLI

pub mod build;
pub mod completions;
pub mod scan;
pub mod version;

use std::path::{Path, PathBuf};

use crate::error::{Result, scan as scan_error};

/// Resolve the theme source folder to an absolute path
fn resolve_input(input: &Path) -> Result<PathBuf> {
    dunce::canonicalize(input)
        .map_err(|e| scan_error::failed(input.display().to_string(), e.to_string()))
}

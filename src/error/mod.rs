//! Error types and handling for the theme builder
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by build stage:
//! - [`input`]: Argument validation, before anything is scanned
//! - [`scan`]: Directory scanning and data directory discovery
//! - [`fragment`]: Reading and parsing configuration fragments
//! - [`resource`]: Resource map collisions
//! - [`expr`]: Expression language failures
//! - [`archive`]: Writing the output container

pub mod archive;
pub mod expr;
pub mod fragment;
pub mod input;
pub mod resource;
pub mod scan;

#[cfg(test)]
mod tests;

pub use expr::ExprError;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for theme builds
///
/// Every variant is fatal: a partially built theme is indistinguishable from a
/// corrupt one, so nothing is downgraded to a warning or retried.
#[derive(Error, Diagnostic, Debug)]
pub enum ThemeError {
    // Input validation errors
    #[error("Output file must use the .ReaperThemeZip extension: {path}")]
    #[diagnostic(
        code(theme::input::invalid_extension),
        help("Name the output file like 'MyTheme.ReaperThemeZip'")
    )]
    InvalidOutputExtension { path: String },

    #[error("The theme name cannot be empty: {path}")]
    #[diagnostic(
        code(theme::input::empty_name),
        help("The output file name without its extension becomes the theme name")
    )]
    EmptyThemeName { path: String },

    #[error("Invalid override key '{key}': {reason}")]
    #[diagnostic(
        code(theme::input::invalid_override),
        help("Override keys have the form 'section.key', e.g. 'REAPER.col_main_bg'")
    )]
    InvalidOverrideKey { key: String, reason: String },

    #[error("Invalid include pattern '{pattern}': {reason}")]
    #[diagnostic(code(theme::input::invalid_pattern))]
    InvalidIncludePattern { pattern: String, reason: String },

    // Scan errors
    #[error("Failed to scan directory: {path}: {reason}")]
    #[diagnostic(code(theme::scan::failed))]
    ScanFailed { path: String, reason: String },

    #[error("No data directory found under: {root}")]
    #[diagnostic(
        code(theme::scan::no_data_directories),
        help("A data directory contains an rtconfig.txt or a *.ReaperTheme file")
    )]
    NoDataDirectories { root: String },

    #[error("No data directory found containing the given root: {root} (unowned files: {files})")]
    #[diagnostic(
        code(theme::scan::orphaned_root_files),
        help(
            "Add an rtconfig.txt or a *.ReaperTheme file to the root, or move the loose files into a data directory"
        )
    )]
    OrphanedRootFiles { root: String, files: String },

    // Fragment errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(theme::fragment::read_failed))]
    FragmentReadFailed { path: String, reason: String },

    #[error("Failed to parse {path} at line {line}: {reason}")]
    #[diagnostic(code(theme::fragment::parse_failed))]
    FragmentParseFailed {
        path: String,
        line: usize,
        reason: String,
    },

    // Merge conflict errors
    #[error("Resource '{archive_path}' is provided by both {first} and {second}")]
    #[diagnostic(
        code(theme::resource::duplicate),
        help("Rename or remove one of the files; every resource needs a unique archive path")
    )]
    DuplicateResource {
        archive_path: String,
        first: String,
        second: String,
    },

    // Expression errors
    #[error("Failed to evaluate '{span}' in {location}: {source}")]
    #[diagnostic(code(theme::expr::failed))]
    ExpressionFailed {
        location: String,
        span: String,
        #[source]
        source: ExprError,
    },

    // Container write errors
    #[error("Failed to write archive: {path}: {reason}")]
    #[diagnostic(code(theme::archive::write_failed))]
    ArchiveWriteFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(theme::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    // Report output errors
    #[error("Failed to serialize report as JSON: {0}")]
    #[diagnostic(code(theme::report::json_failed))]
    JsonFailed(#[from] serde_json::Error),
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ThemeError>;

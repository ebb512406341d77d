//! File classification for theme source folders
//!
//! Every file found during a scan is one of:
//!
//! - a line fragment (`rtconfig.txt`, `*.rtconfig.txt`)
//! - a section fragment (`*.ReaperTheme`)
//! - a plain resource (images and anything else)
//!
//! Matching is a case-insensitive suffix match.

use serde::Serialize;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{Result, input};

/// Suffix of line-oriented configuration fragments
pub const LINE_FRAGMENT_SUFFIX: &str = "rtconfig.txt";

/// Suffix of section/key configuration fragments
pub const SECTION_FRAGMENT_SUFFIX: &str = ".reapertheme";

/// The two kinds of configuration fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Ordered directive list, concatenated across data directories
    Line,
    /// INI-like section/key file, later fragments override earlier ones
    Section,
}

impl FragmentKind {
    /// Display label used in build output
    pub fn label(self) -> &'static str {
        match self {
            FragmentKind::Line => "rtconfig.txt",
            FragmentKind::Section => "*.ReaperTheme",
        }
    }
}

/// Classification of a single file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Fragment(FragmentKind),
    Resource,
}

impl FileKind {
    /// Classify a file by its name
    pub fn classify(file_name: &str) -> Self {
        let lower = file_name.to_lowercase();
        if lower.ends_with(LINE_FRAGMENT_SUFFIX) {
            FileKind::Fragment(FragmentKind::Line)
        } else if lower.ends_with(SECTION_FRAGMENT_SUFFIX) {
            FileKind::Fragment(FragmentKind::Section)
        } else {
            FileKind::Resource
        }
    }
}

/// Restricts which plain files become resources
///
/// An empty filter includes everything. Patterns are matched against the file
/// name only, as given and lower-cased, so `*.png` also picks up `LOGO.PNG`.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    globs: Vec<Glob<'static>>,
}

impl ResourceFilter {
    /// Compile every pattern once, rejecting patterns that are not valid globs
    pub fn new(patterns: &[String]) -> Result<Self> {
        let globs = patterns
            .iter()
            .map(|pattern| {
                Glob::new(pattern)
                    .map(Glob::into_owned)
                    .map_err(|e| input::invalid_pattern(pattern, e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { globs })
    }

    /// Check whether a plain file should be kept as a resource
    pub fn includes(&self, file_name: &str) -> bool {
        if self.globs.is_empty() {
            return true;
        }

        let lower = file_name.to_lowercase();
        self.globs.iter().any(|glob| {
            [file_name, lower.as_str()]
                .into_iter()
                .any(|name| glob.matched(&CandidatePath::from(name)).is_some())
        })
    }
}

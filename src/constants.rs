//! Named constants and colour presets
//!
//! Both tables use the section/key fragment format and are addressed with a
//! dotted name, split on the last dot: `colors.track.bg` is key `bg` in
//! section `colors.track`. Values are kept raw; the evaluator decides what
//! they mean.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::fragment::{SectionMap, read_text};

/// Read-only `(section, key) -> raw value` table
#[derive(Debug, Clone, Default)]
pub struct ConstantsTable {
    entries: SectionMap,
}

impl ConstantsTable {
    /// Load a table from an optional file.
    ///
    /// No path gives an empty table. A path that cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = read_text(path)?;
        let entries = SectionMap::parse(&text, &path.display().to_string())?;
        debug!(path = %path.display(), sections = entries.len(), "loaded table");
        Ok(Self { entries })
    }

    #[cfg(test)]
    pub fn from_sections(entries: SectionMap) -> Self {
        Self { entries }
    }

    /// Raw value for a dotted name, if present
    pub fn get(&self, full_name: &str) -> Option<&str> {
        let (section, key) = split_name(full_name)?;
        self.entries.get(section, key)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `section.key` on the last dot. Both halves must be non-empty.
pub fn split_name(full_name: &str) -> Option<(&str, &str)> {
    full_name
        .rsplit_once('.')
        .filter(|(section, key)| !section.is_empty() && !key.is_empty())
}

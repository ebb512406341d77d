//! Global resource map: archive path -> source file
//!
//! Each data directory is an independent namespace anchored at the theme
//! folder inside the archive, so `theme/150/a.png` and `theme/sub/150/a.png`
//! (where `sub` is a data directory) both become `<name>/150/a.png`. Such a
//! collision is an error, never a silent overwrite.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, resource};
use crate::scanner::DirectoryTree;

/// One file to be stored in the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    pub source_path: PathBuf,
    pub archive_path: String,
}

/// Archive path -> source path, in assignment order
#[derive(Debug, Clone, Default)]
pub struct ResourceMap {
    entries: IndexMap<String, PathBuf>,
}

impl ResourceMap {
    /// Union of every data directory's owned files, prefixed with `theme_name/`
    pub fn build(tree: &DirectoryTree, theme_name: &str) -> Result<Self> {
        let mut map = ResourceMap::default();
        for id in tree.data_directories() {
            for file in tree.owned_files(id) {
                let archive_path = format!("{theme_name}/{}", file.relative_path);
                map.insert(archive_path, file.source_path)?;
            }
        }

        debug!(resources = map.len(), "built resource map");
        Ok(map)
    }

    /// Add one entry, failing if the archive path is already taken
    pub fn insert(&mut self, archive_path: String, source_path: PathBuf) -> Result<()> {
        match self.entries.entry(archive_path) {
            Entry::Occupied(existing) => Err(resource::duplicate(
                existing.key().clone(),
                existing.get().display().to_string(),
                source_path.display().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(source_path);
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, archive_path: &str) -> Option<&Path> {
        self.entries.get(archive_path).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(archive, source)| (archive.as_str(), source.as_path()))
    }

    /// Owned copies of the entries, for reporting
    pub fn entries(&self) -> Vec<ResourceEntry> {
        self.iter()
            .map(|(archive_path, source_path)| ResourceEntry {
                source_path: source_path.to_path_buf(),
                archive_path: archive_path.to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Theme source scanning
//!
//! This module handles:
//! - Walking a theme source folder once and recording every directory
//! - Classifying files into fragments and plain resources
//! - Discovering data directories (directories with at least one fragment)
//! - Computing which resources each data directory owns
//!
//! The tree is an arena: nodes live in one `Vec` and refer to their children by
//! [`NodeId`]. Both discovery and ownership use an explicit breadth-first work
//! queue, so deep trees never recurse and the resulting order is the same on
//! every run (directory listings are sorted by file name).
//!
//! ```text
//! theme/                 <- data directory (has rtconfig.txt)
//!   rtconfig.txt
//!   a.png                -> a.png
//!   150/a.png            -> 150/a.png
//!   extra/               <- nested data directory, scanned as its own unit
//!     colors.ReaperTheme
//!     c.png              -> c.png (relative to extra/, not to theme/)
//! ```

mod classify;

pub use classify::{FileKind, FragmentKind, ResourceFilter};

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, scan};

/// Index of a node in a [`DirectoryTree`]
pub type NodeId = usize;

/// The scan root is always the first node
pub const ROOT: NodeId = 0;

/// One scanned directory
#[derive(Debug, Clone, Default)]
pub struct DirectoryNode {
    /// Location of this directory
    pub path: PathBuf,
    /// Plain resource file names, excluding fragments
    pub files: Vec<String>,
    /// Fragment file names (`rtconfig.txt`, `*.ReaperTheme`)
    pub fragments: Vec<String>,
    /// Subdirectories, in listing order
    pub children: Vec<NodeId>,
}

impl DirectoryNode {
    /// A data directory owns at least one fragment
    pub fn is_data_directory(&self) -> bool {
        !self.fragments.is_empty()
    }
}

/// A fragment file located during the scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentRef {
    /// Path of the fragment file
    pub path: PathBuf,
    /// Fragment kind, from its file name
    pub kind: FragmentKind,
    /// Position of the owning data directory in discovery order
    pub order: usize,
}

/// A plain file owned by a data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnedFile {
    /// Path of the file on disk
    pub source_path: PathBuf,
    /// Path relative to the owning data directory, `/`-separated
    pub relative_path: String,
}

/// Scanned theme source folder
#[derive(Debug, Clone)]
pub struct DirectoryTree {
    nodes: Vec<DirectoryNode>,
}

impl DirectoryTree {
    /// Scan and classify a directory recursively.
    ///
    /// Any unreadable directory fails the whole scan; there are no partial results.
    pub fn scan(root: &Path, filter: &ResourceFilter) -> Result<Self> {
        let metadata =
            fs::metadata(root).map_err(|e| scan::failed(root.display().to_string(), e.to_string()))?;
        if !metadata.is_dir() {
            return Err(scan::failed(root.display().to_string(), "not a directory"));
        }

        let mut nodes = vec![DirectoryNode {
            path: root.to_path_buf(),
            ..DirectoryNode::default()
        }];
        let mut index: HashMap<PathBuf, NodeId> = HashMap::from([(root.to_path_buf(), ROOT)]);

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .min_depth(1)
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).display().to_string();
                scan::failed(path, e.to_string())
            })?;

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                return Err(scan::failed(
                    entry.path().display().to_string(),
                    "file name is not valid UTF-8",
                ));
            };

            let parent = entry
                .path()
                .parent()
                .and_then(|p| index.get(p))
                .copied()
                .ok_or_else(|| {
                    scan::failed(entry.path().display().to_string(), "entry outside scanned tree")
                })?;

            if entry.file_type().is_dir() {
                let id = nodes.len();
                nodes.push(DirectoryNode {
                    path: entry.path().to_path_buf(),
                    ..DirectoryNode::default()
                });
                nodes[parent].children.push(id);
                index.insert(entry.into_path(), id);
                continue;
            }

            match FileKind::classify(&name) {
                FileKind::Fragment(kind) => {
                    debug!(path = %entry.path().display(), kind = kind.label(), "found fragment");
                    nodes[parent].fragments.push(name);
                }
                FileKind::Resource if filter.includes(&name) => nodes[parent].files.push(name),
                FileKind::Resource => {
                    debug!(path = %entry.path().display(), "excluded by include patterns");
                }
            }
        }

        debug!(root = %root.display(), directories = nodes.len(), "scan complete");
        Ok(Self { nodes })
    }

    /// The scan root
    pub fn root(&self) -> &DirectoryNode {
        &self.nodes[ROOT]
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> &DirectoryNode {
        &self.nodes[id]
    }

    /// All directories that have at least one fragment, breadth-first from the root.
    ///
    /// This order is the merge order for fragments and the order in which
    /// resources are assigned.
    pub fn data_directories(&self) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut queue = VecDeque::from([ROOT]);

        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id];
            queue.extend(node.children.iter().copied());
            if node.is_data_directory() {
                found.push(id);
            }
        }

        found
    }

    /// Files owned by one data directory.
    ///
    /// A data directory owns its own plain files and those of every descendant,
    /// except subtrees rooted at a nested data directory: those are independent
    /// units and own their files themselves.
    ///
    /// ```text
    /// - 150/
    ///     - a.png        owned as 150/a.png
    /// - test/            nested data directory, excluded here
    ///     - c.png
    ///     - rtconfig.txt
    /// - a.png            owned as a.png
    /// ```
    pub fn owned_files(&self, id: NodeId) -> Vec<OwnedFile> {
        let owner = &self.nodes[id].path;
        let mut owned = Vec::new();
        let mut queue = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            let node = &self.nodes[current];
            owned.extend(node.files.iter().map(|name| {
                let source_path = node.path.join(name);
                OwnedFile {
                    relative_path: relative_archive_path(owner, &source_path),
                    source_path,
                }
            }));
            queue.extend(
                node.children
                    .iter()
                    .copied()
                    .filter(|&child| !self.nodes[child].is_data_directory()),
            );
        }

        owned
    }

    /// Plain files that no data directory owns
    pub fn orphaned_files(&self) -> Vec<PathBuf> {
        let mut orphans = Vec::new();
        let mut queue = VecDeque::from([ROOT]);

        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id];
            if node.is_data_directory() {
                continue;
            }
            orphans.extend(node.files.iter().map(|name| node.path.join(name)));
            queue.extend(node.children.iter().copied());
        }

        orphans
    }

    /// Fragments of one kind, in merge order
    pub fn fragments(&self, kind: FragmentKind) -> Vec<FragmentRef> {
        self.data_directories()
            .into_iter()
            .enumerate()
            .flat_map(|(order, id)| {
                let node = &self.nodes[id];
                node.fragments
                    .iter()
                    .filter(move |name| FileKind::classify(name) == FileKind::Fragment(kind))
                    .map(move |name| FragmentRef {
                        path: node.path.join(name),
                        kind,
                        order,
                    })
            })
            .collect()
    }

    /// Enforce the ownership policy before anything is merged.
    ///
    /// - a tree without any data directory is an error
    /// - loose files directly under a root that is not a data directory are an error
    /// - any deeper unowned file is dropped with a warning
    pub fn check_ownership(&self) -> Result<()> {
        let root = self.root();

        if self.data_directories().is_empty() {
            return Err(scan::no_data_directories(root.path.display().to_string()));
        }

        if !root.is_data_directory() && !root.files.is_empty() {
            return Err(scan::orphaned_root_files(
                root.path.display().to_string(),
                &root.files,
            ));
        }

        for orphan in self.orphaned_files() {
            warn!(path = %orphan.display(), "file is not inside any data directory, skipping");
        }

        Ok(())
    }
}

/// Path of `file` relative to `owner`, joined with `/` for use inside an archive
fn relative_archive_path(owner: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(owner).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

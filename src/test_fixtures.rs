//! Test fixtures for building theme source trees on disk.
//!
//! Most unit tests need a small folder of fragments and images. Instead of
//! repeating `create_dir_all` + `fs::write` in every test:
//!
//! ```ignore
//! use crate::test_fixtures::create_theme_tree;
//!
//! let temp = create_theme_tree(&[
//!     ("rtconfig.txt", "clear tcp.*"),
//!     ("150/tcp_bg.png", "png"),
//! ]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create an empty temp directory in the system temp location.
///
/// A relative `TMPDIR` would place temp dirs under the current working
/// directory, so it falls back to `/tmp` in that case.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    let base = std::env::temp_dir();
    let base = if base.is_absolute() {
        base
    } else {
        PathBuf::from("/tmp")
    };
    TempDir::new_in(base).expect("Failed to create temp directory")
}

/// Write `content` to `relative` under `root`, creating parent directories.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

/// Create a temp directory populated with `(relative path, content)` pairs.
///
/// # Panics
///
/// Panics if any file cannot be written.
#[must_use]
pub fn create_theme_tree(files: &[(&str, &str)]) -> TempDir {
    let temp = create_temp_dir();
    for (relative, content) in files {
        write_file(temp.path(), relative, content);
    }
    temp
}

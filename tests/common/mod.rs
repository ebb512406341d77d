//! Common test utilities for theme builder integration tests

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch directory holding a theme source folder and build outputs
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Absolute path inside the workspace
    pub fn join(&self, path: &str) -> PathBuf {
        self.path.join(path)
    }
}

/// The real binary
#[allow(deprecated)]
pub fn theme_cmd() -> Command {
    Command::cargo_bin("reaper-theme-builder").expect("binary is built")
}

/// Read every member of a zip archive into memory
#[allow(dead_code)]
pub fn read_archive(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let file = File::open(path).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    let mut members = BTreeMap::new();
    for index in 0..archive.len() {
        let mut member = archive.by_index(index).expect("Failed to read member");
        let mut bytes = Vec::new();
        member.read_to_end(&mut bytes).expect("Failed to read member");
        members.insert(member.name().to_string(), bytes);
    }
    members
}

/// Read one text member of a zip archive
#[allow(dead_code)]
pub fn archive_text(members: &BTreeMap<String, Vec<u8>>, name: &str) -> String {
    let bytes = members
        .get(name)
        .unwrap_or_else(|| panic!("archive has no member {name}"));
    String::from_utf8(bytes.clone()).expect("member is UTF-8")
}

//! Writing the `.ReaperThemeZip` container
//!
//! Layout for a theme named `MyTheme`:
//!
//! ```text
//! MyTheme.ReaperTheme        merged section/key text
//! MyTheme/rtconfig.txt       merged line-oriented text
//! MyTheme/<resource path>    one member per resource map entry
//! ```
//!
//! The archive is written to a temporary file next to the output and renamed
//! into place only after every member has been written.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::error::{Result, archive, input};
use crate::pipeline::CompiledTheme;
use crate::ui::ProgressReporter;

/// Required output extension, matched case-insensitively
pub const ARCHIVE_EXTENSION: &str = "ReaperThemeZip";

/// Validated output location and the theme name derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveTarget {
    pub path: PathBuf,
    pub name: String,
}

impl ArchiveTarget {
    /// Validate an output path: it must end in `.ReaperThemeZip` and its stem becomes the theme name
    pub fn from_output(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| input::invalid_extension(&display))?;

        let Some((stem, extension)) = file_name.rsplit_once('.') else {
            return Err(input::invalid_extension(&display));
        };
        if !extension.eq_ignore_ascii_case(ARCHIVE_EXTENSION) {
            return Err(input::invalid_extension(&display));
        }
        if stem.trim().is_empty() {
            return Err(input::empty_name(&display));
        }

        Ok(Self {
            path: path.to_path_buf(),
            name: stem.to_string(),
        })
    }

    /// Archive member holding the section/key text
    pub fn rptheme_member(&self) -> String {
        format!("{}.ReaperTheme", self.name)
    }

    /// Archive member holding the line-oriented text
    pub fn rtconfig_member(&self) -> String {
        format!("{}/rtconfig.txt", self.name)
    }

    /// Loose copies written by `--debug`: `(.ReaperTheme, .rtconfig.txt)`
    pub fn debug_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.path.with_extension("ReaperTheme"),
            self.path.with_extension("rtconfig.txt"),
        )
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Write the compiled theme into the target archive
pub fn write_archive(
    target: &ArchiveTarget,
    theme: &CompiledTheme,
    progress: &mut dyn ProgressReporter,
) -> Result<()> {
    let output = target.path.display().to_string();
    let failed = |reason: String| archive::write_failed(&output, reason);

    let temp = NamedTempFile::new_in(target.directory()).map_err(|e| failed(e.to_string()))?;
    let mut zip = ZipWriter::new(temp);
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    progress.start(theme.resources.len() as u64 + 2);

    let result = (|| -> Result<()> {
        for (archive_path, source_path) in theme.resources.iter() {
            progress.member(archive_path);
            debug!(member = archive_path, source = %source_path.display(), "adding resource");
            zip.start_file(archive_path, options)
                .map_err(|e| failed(e.to_string()))?;
            let mut source = File::open(source_path)
                .map_err(|e| failed(format!("{}: {e}", source_path.display())))?;
            io::copy(&mut source, &mut zip).map_err(|e| failed(e.to_string()))?;
        }

        for (member, text) in [
            (target.rptheme_member(), &theme.rptheme),
            (target.rtconfig_member(), &theme.rtconfig),
        ] {
            progress.member(&member);
            zip.start_file(member.as_str(), options)
                .map_err(|e| failed(e.to_string()))?;
            zip.write_all(text.as_bytes())
                .map_err(|e| failed(e.to_string()))?;
        }
        Ok(())
    })();

    if let Err(e) = result {
        progress.abandon();
        return Err(e);
    }

    let temp = zip.finish().map_err(|e| failed(e.to_string()))?;
    temp.persist(&target.path)
        .map_err(|e| failed(e.error.to_string()))?;
    progress.finish();

    info!(
        path = %target.path.display(),
        members = theme.resources.len() + 2,
        "wrote archive"
    );
    Ok(())
}

/// Write the merged texts beside the archive, returning the written paths
pub fn write_debug_files(target: &ArchiveTarget, theme: &CompiledTheme) -> Result<Vec<PathBuf>> {
    let (rptheme_path, rtconfig_path) = target.debug_paths();
    for (path, text) in [(&rptheme_path, &theme.rptheme), (&rtconfig_path, &theme.rtconfig)] {
        fs::write(path, text)
            .map_err(|e| archive::file_write_failed(path.display().to_string(), e.to_string()))?;
        debug!(path = %path.display(), "wrote debug file");
    }
    Ok(vec![rptheme_path, rtconfig_path])
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ThemeError;
    use crate::resources::ResourceMap;
    use crate::test_fixtures::{create_temp_dir, write_file};
    use crate::ui::SilentProgressReporter;
    use std::io::Read;

    fn theme_with(resources: ResourceMap) -> CompiledTheme {
        CompiledTheme {
            name: "My Theme".to_string(),
            rptheme: "[REAPER]\nk=1\n\n".to_string(),
            rtconfig: "clear tcp.*".to_string(),
            resources,
        }
    }

    #[test]
    fn test_target_accepts_extension_case_insensitively() {
        let target = ArchiveTarget::from_output(Path::new("out/My Theme.reaperthemezip"))
            .expect("valid output");
        assert_eq!(target.name, "My Theme");
        assert_eq!(target.rptheme_member(), "My Theme.ReaperTheme");
        assert_eq!(target.rtconfig_member(), "My Theme/rtconfig.txt");
    }

    #[test]
    fn test_target_keeps_inner_dots_in_name() {
        let target = ArchiveTarget::from_output(Path::new("v1.2.ReaperThemeZip")).expect("valid");
        assert_eq!(target.name, "v1.2");
        assert_eq!(target.directory(), Path::new("."));
    }

    #[test]
    fn test_target_rejects_wrong_extension() {
        for path in ["theme.zip", "theme", "theme.ReaperTheme"] {
            assert!(matches!(
                ArchiveTarget::from_output(Path::new(path)),
                Err(ThemeError::InvalidOutputExtension { .. })
            ));
        }
    }

    #[test]
    fn test_target_rejects_empty_name() {
        assert!(matches!(
            ArchiveTarget::from_output(Path::new("out/.ReaperThemeZip")),
            Err(ThemeError::EmptyThemeName { .. })
        ));
    }

    #[test]
    fn test_debug_paths() {
        let target = ArchiveTarget::from_output(Path::new("out/T.ReaperThemeZip")).expect("valid");
        let (rptheme, rtconfig) = target.debug_paths();
        assert_eq!(rptheme, Path::new("out/T.ReaperTheme"));
        assert_eq!(rtconfig, Path::new("out/T.rtconfig.txt"));
    }

    #[test]
    fn test_write_archive_members() {
        let temp = create_temp_dir();
        let image = write_file(temp.path(), "src/a.png", "png-bytes");
        let mut resources = ResourceMap::default();
        resources
            .insert("My Theme/150/a.png".to_string(), image)
            .expect("insert");

        let target = ArchiveTarget::from_output(&temp.path().join("My Theme.ReaperThemeZip"))
            .expect("valid");
        write_archive(&target, &theme_with(resources), &mut SilentProgressReporter)
            .expect("writes");

        let file = File::open(&target.path).expect("archive exists");
        let mut zip = zip::ZipArchive::new(file).expect("valid zip");
        let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "My Theme.ReaperTheme",
                "My Theme/150/a.png",
                "My Theme/rtconfig.txt",
            ]
        );

        let mut text = String::new();
        zip.by_name("My Theme/rtconfig.txt")
            .expect("member")
            .read_to_string(&mut text)
            .expect("read");
        assert_eq!(text, "clear tcp.*");

        let mut bytes = String::new();
        zip.by_name("My Theme/150/a.png")
            .expect("member")
            .read_to_string(&mut bytes)
            .expect("read");
        assert_eq!(bytes, "png-bytes");
    }

    #[test]
    fn test_write_archive_leaves_nothing_on_failure() {
        let temp = create_temp_dir();
        let mut resources = ResourceMap::default();
        resources
            .insert("T/missing.png".to_string(), temp.path().join("missing.png"))
            .expect("insert");

        let target =
            ArchiveTarget::from_output(&temp.path().join("T.ReaperThemeZip")).expect("valid");
        let result = write_archive(&target, &theme_with(resources), &mut SilentProgressReporter);

        assert!(matches!(result, Err(ThemeError::ArchiveWriteFailed { .. })));
        assert!(!target.path.exists());
        let leftovers = fs::read_dir(temp.path()).expect("read dir").count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_write_debug_files() {
        let temp = create_temp_dir();
        let target =
            ArchiveTarget::from_output(&temp.path().join("T.ReaperThemeZip")).expect("valid");
        let written =
            write_debug_files(&target, &theme_with(ResourceMap::default())).expect("writes");

        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(temp.path().join("T.ReaperTheme")).expect("read"),
            "[REAPER]\nk=1\n\n"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("T.rtconfig.txt")).expect("read"),
            "clear tcp.*"
        );
    }
}

//! Configuration fragments
//!
//! Reading fragment files off disk, and the two fragment formats:
//! - [`line`]: ordered directive lists (`rtconfig.txt`)
//! - [`section`]: section/key tables (`*.ReaperTheme`, constants, presets)

pub mod line;
pub mod section;

pub use line::strip_comments;
pub use section::SectionMap;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, fragment};
use crate::scanner::{FragmentKind, FragmentRef};

/// Raw content of one fragment, tagged with its merge position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFragment {
    pub path: PathBuf,
    pub kind: FragmentKind,
    /// Discovery order of the owning data directory
    pub order: usize,
    pub text: String,
}

impl ConfigFragment {
    /// Read a fragment located by the scanner
    pub fn read(fragment_ref: &FragmentRef) -> Result<Self> {
        let text = read_text(&fragment_ref.path)?;
        debug!(
            path = %fragment_ref.path.display(),
            bytes = text.len(),
            "read fragment"
        );
        Ok(Self {
            path: fragment_ref.path.clone(),
            kind: fragment_ref.kind,
            order: fragment_ref.order,
            text,
        })
    }

    /// Parse as a section/key fragment
    pub fn parse_sections(&self) -> Result<SectionMap> {
        SectionMap::parse(&self.text, &self.path.display().to_string())
    }
}

/// Read a UTF-8 text file, dropping a leading byte order mark
pub fn read_text(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).map_err(|e| fragment::read_failed(path.display().to_string(), e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        fragment::read_failed(path.display().to_string(), format!("not valid UTF-8: {e}"))
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_fixtures::{create_temp_dir, write_file};

    #[test]
    fn test_read_fragment() {
        let temp = create_temp_dir();
        let path = write_file(temp.path(), "colors.ReaperTheme", "[s]\nk=1\n");
        let fragment = ConfigFragment::read(&FragmentRef {
            path,
            kind: FragmentKind::Section,
            order: 2,
        })
        .expect("read succeeds");

        assert_eq!(fragment.order, 2);
        let map = fragment.parse_sections().expect("parses");
        assert_eq!(map.get("s", "k"), Some("1"));
    }

    #[test]
    fn test_read_text_strips_bom() {
        let temp = create_temp_dir();
        let path = write_file(temp.path(), "rtconfig.txt", "\u{feff}clear tcp.*");
        assert_eq!(read_text(&path).expect("read succeeds"), "clear tcp.*");
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8() {
        let temp = create_temp_dir();
        let path = temp.path().join("rtconfig.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).expect("write");
        assert!(matches!(
            read_text(&path),
            Err(crate::error::ThemeError::FragmentReadFailed { .. })
        ));
    }

    #[test]
    fn test_read_missing_file_fails() {
        let temp = create_temp_dir();
        assert!(read_text(&temp.path().join("missing.ReaperTheme")).is_err());
    }
}

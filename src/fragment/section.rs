//! Section/key fragments (`*.ReaperTheme`, constants and presets files)
//!
//! The format is INI-like:
//!
//! ```text
//! ; full-line comment
//! [color theme]
//! col_main_bg2=3355443
//! tcp_list_bg: {{rgb(20, 20, 20)}}
//! multi=first
//!     continued
//! ```
//!
//! Sections and keys keep their spelling and their first-seen order.

use indexmap::IndexMap;

use crate::error::{Result, fragment};

/// Keys of one section, in first-seen order
pub type Section = IndexMap<String, String>;

/// Parsed section/key table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: IndexMap<String, Section>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse fragment text. `source` names the fragment in error messages.
    pub fn parse(text: &str, source: &str) -> Result<Self> {
        let mut map = SectionMap::new();
        let mut section: Option<String> = None;
        let mut key: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with([' ', '\t']);
            if indented {
                if let (Some(s), Some(k)) = (&section, &key) {
                    if let Some(value) = map.sections.get_mut(s).and_then(|keys| keys.get_mut(k)) {
                        value.push('\n');
                        value.push_str(trimmed);
                    }
                    continue;
                }
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                let Some(name) = header.strip_suffix(']') else {
                    return Err(fragment::parse_failed(
                        source,
                        line_no,
                        "unterminated section header",
                    ));
                };
                if name.is_empty() {
                    return Err(fragment::parse_failed(source, line_no, "empty section name"));
                }
                if map.sections.contains_key(name) {
                    return Err(fragment::parse_failed(
                        source,
                        line_no,
                        format!("section '{name}' already exists"),
                    ));
                }
                map.sections.insert(name.to_string(), Section::new());
                section = Some(name.to_string());
                key = None;
                continue;
            }

            let Some(current) = section.as_deref() else {
                return Err(fragment::parse_failed(
                    source,
                    line_no,
                    "option found before any section header",
                ));
            };

            let Some(split) = trimmed.find(['=', ':']) else {
                return Err(fragment::parse_failed(
                    source,
                    line_no,
                    format!("expected 'key=value', found '{trimmed}'"),
                ));
            };

            let name = trimmed[..split].trim();
            let value = trimmed[split + 1..].trim();
            if name.is_empty() {
                return Err(fragment::parse_failed(source, line_no, "empty option name"));
            }

            let keys = map.sections.entry(current.to_string()).or_default();
            if keys.contains_key(name) {
                return Err(fragment::parse_failed(
                    source,
                    line_no,
                    format!("option '{name}' already exists in section '{current}'"),
                ));
            }
            keys.insert(name.to_string(), value.to_string());
            key = Some(name.to_string());
        }

        Ok(map)
    }

    /// Look up one value
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    /// Set one value, creating the section when it does not exist yet
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Apply `other` on top of `self`: its values overwrite same section+key.
    ///
    /// Existing entries keep their position; new ones are appended.
    pub fn merge(&mut self, other: SectionMap) {
        for (name, keys) in other.sections {
            let target = self.sections.entry(name).or_default();
            for (key, value) in keys {
                target.insert(key, value);
            }
        }
    }

    /// Replace every value with `f(section, key, value)`, stopping at the first error
    pub fn try_map_values<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&str, &str, &str) -> Result<String>,
    {
        for (section, keys) in &mut self.sections {
            for (key, value) in keys.iter_mut() {
                *value = f(section, key, value)?;
            }
        }
        Ok(())
    }

    /// Iterate over sections in order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, keys)| (name.as_str(), keys))
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Serialize back to text
    ///
    /// Multi-line values are written with tab-indented continuation lines so
    /// that [`SectionMap::parse`] reads them back unchanged.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (name, keys) in &self.sections {
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
            for (key, value) in keys {
                out.push_str(key);
                out.push('=');
                out.push_str(&value.replace('\n', "\n\t"));
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

//! Command-line overrides for section/key values

use crate::error::{Result, input};
use crate::fragment::SectionMap;

/// One `section.key = value` override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub section: String,
    pub key: String,
    pub value: String,
}

/// Overrides in the order they were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    entries: Vec<Override>,
}

impl Overrides {
    /// Validate `(dotted key, value)` pairs.
    ///
    /// A dotted key must contain exactly one `.` with text on both sides.
    pub fn parse(pairs: &[(String, String)]) -> Result<Self> {
        let entries = pairs
            .iter()
            .map(|(dotted, value)| {
                let (section, key) = parse_key(dotted)?;
                Ok(Override {
                    section: section.to_string(),
                    key: key.to_string(),
                    value: value.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Write every override into `map`, creating sections as needed
    pub fn apply(&self, map: &mut SectionMap) {
        for entry in &self.entries {
            map.set(&entry.section, &entry.key, entry.value.clone());
        }
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Override> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn parse_key(dotted: &str) -> Result<(&str, &str)> {
    let mut parts = dotted.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(section), Some(key), None) if !section.is_empty() && !key.is_empty() => {
            Ok((section, key))
        }
        (Some(_), Some(_), None) => Err(input::invalid_override(
            dotted,
            "section and key must not be empty",
        )),
        _ => Err(input::invalid_override(
            dotted,
            "expected exactly one '.' between section and key",
        )),
    }
}

//! Merging fragments across data directories
//!
//! Line fragments concatenate in discovery order. Section fragments override:
//! a later `(section, key)` replaces an earlier one, then command-line
//! overrides are applied on top.

mod overrides;

pub use overrides::Overrides;

use tracing::debug;

use crate::error::Result;
use crate::expr::Evaluator;
use crate::fragment::{ConfigFragment, SectionMap, strip_comments};
use crate::scanner::FragmentRef;

/// Location used in error messages for the merged line blob
pub const LINE_BLOB_LOCATION: &str = "rtconfig.txt";

/// Read and concatenate line fragments in order
pub fn merge_line_fragments(fragments: &[FragmentRef], minify: bool) -> Result<String> {
    let texts = fragments
        .iter()
        .map(|fragment_ref| ConfigFragment::read(fragment_ref).map(|f| f.text))
        .collect::<Result<Vec<_>>>()?;

    let merged = join_line_texts(texts.iter().map(String::as_str), minify);
    debug!(fragments = fragments.len(), bytes = merged.len(), minify, "merged line fragments");
    Ok(merged)
}

/// Concatenate line fragment bodies with a single newline between them.
///
/// With `minify`, comments and blank lines are stripped first. Bodies that end
/// up empty contribute nothing.
pub fn join_line_texts<'a>(texts: impl IntoIterator<Item = &'a str>, minify: bool) -> String {
    texts
        .into_iter()
        .map(|text| {
            if minify {
                strip_comments(text)
            } else {
                text.trim_end_matches(['\r', '\n']).to_string()
            }
        })
        .filter(|body| !body.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read, parse and merge section fragments in order, then apply `overrides`
pub fn merge_section_fragments(fragments: &[FragmentRef], overrides: &Overrides) -> Result<SectionMap> {
    let mut merged = SectionMap::new();
    for fragment_ref in fragments {
        let fragment = ConfigFragment::read(fragment_ref)?;
        merged.merge(fragment.parse_sections()?);
    }
    overrides.apply(&mut merged);

    debug!(
        fragments = fragments.len(),
        sections = merged.len(),
        overrides = overrides.len(),
        "merged section fragments"
    );
    Ok(merged)
}

/// Run every merged value through the evaluator, in place
pub fn expand_sections(map: &mut SectionMap, evaluator: &mut Evaluator) -> Result<()> {
    map.try_map_values(|section, key, value| evaluator.expand(value, &format!("{section}.{key}")))
}

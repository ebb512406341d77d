//! Theme compilation: scan, merge, evaluate
//!
//! ```text
//! source tree -> scan -> ownership check -> resource map
//!                     -> line fragments    -> concat  -> expand -> rtconfig.txt
//!                     -> section fragments -> override -> overrides -> expand -> .ReaperTheme
//! ```
//!
//! Nothing here writes to disk; see [`crate::archive`] for that.

use std::path::Path;

use tracing::info;

use crate::constants::ConstantsTable;
use crate::error::Result;
use crate::expr::Evaluator;
use crate::merge::{self, LINE_BLOB_LOCATION, Overrides};
use crate::resources::ResourceMap;
use crate::scanner::{DirectoryTree, FragmentKind, FragmentRef, ResourceFilter};

/// Everything that changes how a theme is compiled
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub minify: bool,
    pub overrides: Overrides,
    pub filter: ResourceFilter,
    pub constants: ConstantsTable,
    pub presets: ConstantsTable,
}

/// What a build would use, before any fragment is read
#[derive(Debug, Clone)]
pub struct ThemePlan {
    pub tree: DirectoryTree,
    pub line_fragments: Vec<FragmentRef>,
    pub section_fragments: Vec<FragmentRef>,
    pub resources: ResourceMap,
}

impl ThemePlan {
    /// Scan `root`, enforce the ownership policy and assign archive paths
    pub fn discover(root: &Path, theme_name: &str, filter: &ResourceFilter) -> Result<Self> {
        let tree = DirectoryTree::scan(root, filter)?;
        tree.check_ownership()?;

        let resources = ResourceMap::build(&tree, theme_name)?;
        let line_fragments = tree.fragments(FragmentKind::Line);
        let section_fragments = tree.fragments(FragmentKind::Section);

        info!(
            data_directories = tree.data_directories().len(),
            line_fragments = line_fragments.len(),
            section_fragments = section_fragments.len(),
            resources = resources.len(),
            "discovered theme sources"
        );

        Ok(Self {
            tree,
            line_fragments,
            section_fragments,
            resources,
        })
    }
}

/// The three build outputs
#[derive(Debug, Clone)]
pub struct CompiledTheme {
    pub name: String,
    /// Merged, evaluated section/key text (`<name>.ReaperTheme`)
    pub rptheme: String,
    /// Merged, evaluated line-oriented text (`<name>/rtconfig.txt`)
    pub rtconfig: String,
    pub resources: ResourceMap,
}

/// Compile the theme source folder at `root`
pub fn compile(root: &Path, theme_name: &str, options: BuildOptions) -> Result<CompiledTheme> {
    let plan = ThemePlan::discover(root, theme_name, &options.filter)?;
    let mut evaluator = Evaluator::new(options.constants, options.presets);

    let mut sections = merge::merge_section_fragments(&plan.section_fragments, &options.overrides)?;
    merge::expand_sections(&mut sections, &mut evaluator)?;
    let rptheme = sections.serialize();

    let lines = merge::merge_line_fragments(&plan.line_fragments, options.minify)?;
    let rtconfig = evaluator.expand(&lines, LINE_BLOB_LOCATION)?;

    info!(
        sections = sections.len(),
        rtconfig_bytes = rtconfig.len(),
        "compiled theme"
    );

    Ok(CompiledTheme {
        name: theme_name.to_string(),
        rptheme,
        rtconfig,
        resources: plan.resources,
    })
}

//! Scan command implementation

use std::path::Path;

use serde::Serialize;

use super::resolve_input;
use crate::cli::ScanArgs;
use crate::error::Result;
use crate::pipeline::ThemePlan;
use crate::resources::ResourceEntry;
use crate::scanner::{FragmentRef, OwnedFile, ResourceFilter};
use crate::ui::display::{display_plan, relative_display};

const DEFAULT_THEME_NAME: &str = "theme";

/// JSON form of a theme plan
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub root: String,
    pub theme_name: String,
    pub data_directories: Vec<DataDirectoryReport>,
    pub line_fragments: Vec<FragmentRef>,
    pub section_fragments: Vec<FragmentRef>,
    pub resources: Vec<ResourceEntry>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DataDirectoryReport {
    /// Relative to the scanned root, `.` for the root itself
    pub path: String,
    pub fragments: Vec<String>,
    pub owned_files: Vec<OwnedFile>,
}

impl ScanReport {
    pub fn new(root: &Path, theme_name: &str, plan: &ThemePlan) -> Self {
        let data_directories = plan
            .tree
            .data_directories()
            .into_iter()
            .map(|id| {
                let node = plan.tree.node(id);
                DataDirectoryReport {
                    path: relative_display(root, &node.path),
                    fragments: node.fragments.clone(),
                    owned_files: plan.tree.owned_files(id),
                }
            })
            .collect();

        Self {
            root: root.display().to_string(),
            theme_name: theme_name.to_string(),
            data_directories,
            line_fragments: plan.line_fragments.clone(),
            section_fragments: plan.section_fragments.clone(),
            resources: plan.resources.entries(),
            skipped: plan
                .tree
                .orphaned_files()
                .iter()
                .map(|path| relative_display(root, path))
                .collect(),
        }
    }
}

/// Run scan command
pub fn run(args: ScanArgs) -> Result<()> {
    let filter = ResourceFilter::new(&args.include)?;
    let input = resolve_input(&args.input)?;
    let name = args.name.clone().unwrap_or_else(|| {
        input
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_THEME_NAME)
            .to_string()
    });

    let plan = ThemePlan::discover(&input, &name, &filter)?;

    if args.json {
        let report = ScanReport::new(&input, &name, &plan);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_plan(&input, &plan);
    }

    Ok(())
}

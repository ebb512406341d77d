//! Console output for theme plans and build results

use std::path::Path;

use console::Style;

use crate::pipeline::ThemePlan;
use crate::scanner::FragmentRef;

/// Path relative to the scanned root, with `/` separators. The root itself is `.`
pub fn relative_display(root: &Path, path: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return path.display().to_string();
    };
    let text = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if text.is_empty() { ".".to_string() } else { text }
}

/// Print data directories, fragments and resources of a plan
pub fn display_plan(root: &Path, plan: &ThemePlan) {
    let bold = Style::new().bold();
    let dim = Style::new().dim();

    println!("{}", bold.apply_to("Data directories:"));
    for id in plan.tree.data_directories() {
        let node = plan.tree.node(id);
        println!(
            "  {}",
            Style::new().bold().yellow().apply_to(relative_display(root, &node.path))
        );
        for name in &node.fragments {
            println!("    {} {}", dim.apply_to("fragment"), name);
        }
    }

    display_fragments("Line fragments:", root, &plan.line_fragments);
    display_fragments("Section fragments:", root, &plan.section_fragments);

    println!();
    println!(
        "{} {}",
        bold.apply_to("Resources:"),
        dim.apply_to(format!("({})", plan.resources.len()))
    );
    if plan.resources.is_empty() {
        println!("  {}", dim.apply_to("(none)"));
    }
    for (archive_path, source_path) in plan.resources.iter() {
        println!(
            "  {} {} {}",
            Style::new().green().apply_to(archive_path),
            dim.apply_to("<-"),
            relative_display(root, source_path)
        );
    }

    let orphans = plan.tree.orphaned_files();
    if !orphans.is_empty() {
        println!();
        println!("{}", Style::new().bold().red().apply_to("Skipped (no data directory):"));
        for orphan in orphans {
            println!("  {}", relative_display(root, &orphan));
        }
    }
}

fn display_fragments(title: &str, root: &Path, fragments: &[FragmentRef]) {
    println!();
    println!("{}", Style::new().bold().apply_to(title));
    if fragments.is_empty() {
        println!("  {}", Style::new().dim().apply_to("(none)"));
    }
    for (position, fragment) in fragments.iter().enumerate() {
        println!("  {}. {}", position + 1, relative_display(root, &fragment.path));
    }
}

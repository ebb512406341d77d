//! Build command implementation
//!
//! Every argument is validated before the source folder is touched: output
//! name, override keys, include patterns, constants and presets files.

use console::Style;
use tracing::debug;

use super::resolve_input;
use crate::archive::{self, ArchiveTarget};
use crate::cli::BuildArgs;
use crate::constants::ConstantsTable;
use crate::error::Result;
use crate::merge::Overrides;
use crate::pipeline::{self, BuildOptions};
use crate::scanner::ResourceFilter;
use crate::ui;

/// Run build command
pub fn run(args: BuildArgs) -> Result<()> {
    let target = ArchiveTarget::from_output(&args.output)?;
    let overrides = Overrides::parse(&args.override_pairs())?;
    let filter = ResourceFilter::new(&args.include)?;
    let constants = ConstantsTable::load(args.constants.as_deref())?;
    let presets = ConstantsTable::load(args.presets.as_deref())?;
    let input = resolve_input(&args.input)?;

    debug!(
        input = %input.display(),
        output = %target.path.display(),
        overrides = overrides.len(),
        "validated build arguments"
    );

    println!(
        "{} {} {}",
        Style::new().bold().green().apply_to("Building"),
        Style::new().bold().apply_to(&target.name),
        Style::new().dim().apply_to(format!("from {}", input.display()))
    );

    let options = BuildOptions {
        minify: args.minify,
        overrides,
        filter,
        constants,
        presets,
    };
    let theme = pipeline::compile(&input, &target.name, options)?;

    if args.debug {
        for path in archive::write_debug_files(&target, &theme)? {
            println!(
                "  {} {}",
                Style::new().dim().apply_to("wrote"),
                path.display()
            );
        }
    }

    let mut progress = ui::reporter();
    archive::write_archive(&target, &theme, progress.as_mut())?;

    println!(
        "{} {} {}",
        Style::new().bold().green().apply_to("Wrote"),
        target.path.display(),
        Style::new()
            .dim()
            .apply_to(format!("({} resources)", theme.resources.len()))
    );

    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ThemeError;
    use crate::test_fixtures::{create_temp_dir, create_theme_tree};
    use std::path::PathBuf;

    fn args(input: PathBuf, output: PathBuf) -> BuildArgs {
        BuildArgs {
            input,
            output,
            config: Vec::new(),
            debug: false,
            minify: false,
            constants: None,
            presets: None,
            include: Vec::new(),
        }
    }

    #[test]
    fn test_build_writes_archive() {
        let source = create_theme_tree(&[("rtconfig.txt", "clear tcp.*"), ("a.png", "png")]);
        let out = create_temp_dir();
        let output = out.path().join("T.ReaperThemeZip");

        run(args(source.path().to_path_buf(), output.clone())).expect("builds");
        assert!(output.exists());
    }

    #[test]
    fn test_build_validates_before_scanning() {
        let out = create_temp_dir();
        let missing_input = out.path().join("does-not-exist");

        let result = run(args(missing_input.clone(), out.path().join("T.zip")));
        assert!(matches!(result, Err(ThemeError::InvalidOutputExtension { .. })));

        let mut bad_override = args(missing_input, out.path().join("T.ReaperThemeZip"));
        bad_override.config = vec!["nodot".to_string(), "1".to_string()];
        assert!(matches!(
            run(bad_override),
            Err(ThemeError::InvalidOverrideKey { .. })
        ));
    }

    #[test]
    fn test_build_missing_constants_file_fails() {
        let source = create_theme_tree(&[("rtconfig.txt", "")]);
        let out = create_temp_dir();
        let mut build = args(source.path().to_path_buf(), out.path().join("T.ReaperThemeZip"));
        build.constants = Some(out.path().join("missing.ini"));

        assert!(matches!(
            run(build),
            Err(ThemeError::FragmentReadFailed { .. })
        ));
        assert!(!out.path().join("T.ReaperThemeZip").exists());
    }

    #[test]
    fn test_build_debug_writes_loose_files() {
        let source = create_theme_tree(&[("rtconfig.txt", "x"), ("t.ReaperTheme", "[S]\nk=1\n")]);
        let out = create_temp_dir();
        let mut build = args(source.path().to_path_buf(), out.path().join("T.ReaperThemeZip"));
        build.debug = true;

        run(build).expect("builds");
        assert!(out.path().join("T.ReaperTheme").exists());
        assert!(out.path().join("T.rtconfig.txt").exists());
    }
}

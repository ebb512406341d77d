use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Arguments for build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Build a theme:\n    reaper-theme-builder build ./theme Dark.ReaperThemeZip\n\n\
                  Override a value:\n    reaper-theme-builder build ./theme Dark.ReaperThemeZip -c \"color theme.col_main_bg\" 3355443\n\n\
                  Minify rtconfig.txt and write loose copies for inspection:\n    reaper-theme-builder build ./theme Dark.ReaperThemeZip --minify --debug\n\n\
                  Only pack images:\n    reaper-theme-builder build ./theme Dark.ReaperThemeZip --include '*.png'")]
pub struct BuildArgs {
    /// Theme source folder
    pub input: PathBuf,

    /// Output file, must end in .ReaperThemeZip (its name becomes the theme name)
    pub output: PathBuf,

    /// Override a section/key value, e.g. -c REAPER.col_main_bg 3355443 (repeatable)
    #[arg(
        short = 'c',
        long = "config",
        num_args = 2,
        value_names = ["KEY", "VALUE"],
        action = ArgAction::Append
    )]
    pub config: Vec<String>,

    /// Also write the merged .ReaperTheme and rtconfig.txt next to the output
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Strip comments, whitespace and blank lines from rtconfig.txt
    #[arg(long, short = 'm')]
    pub minify: bool,

    /// Constants file used by c("section.key")
    #[arg(long = "constants", short = 'p', env = "REAPER_THEME_CONSTANTS")]
    pub constants: Option<PathBuf>,

    /// Colour presets file used by p("section.name")
    #[arg(long, env = "REAPER_THEME_PRESETS")]
    pub presets: Option<PathBuf>,

    /// Only pack resources whose file name matches GLOB (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,
}

impl BuildArgs {
    /// `-c KEY VALUE` occurrences as pairs
    pub fn override_pairs(&self) -> Vec<(String, String)> {
        self.config
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect()
    }
}

//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - build: Build command arguments
//! - scan: Scan command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod build;
pub mod completions;
pub mod scan;

pub use build::BuildArgs;
pub use completions::CompletionsArgs;
pub use scan::ScanArgs;

/// REAPER theme builder
///
/// Compile a folder of theme fragments and images into a .ReaperThemeZip.
#[derive(Parser, Debug)]
#[command(
    name = "reaper-theme-builder",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Build REAPER themes from a folder of fragments and images",
    long_about = "Scans a theme source folder for data directories (folders with an rtconfig.txt \
                  or *.ReaperTheme file), merges their fragments, evaluates {{...}} macros and \
                  packs everything into a .ReaperThemeZip.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  reaper-theme-builder build ./theme Dark.ReaperThemeZip            \x1b[90m# Build a theme\x1b[0m\n   \
                  reaper-theme-builder build ./theme Dark.ReaperThemeZip -m -d      \x1b[90m# Minify and keep loose copies\x1b[0m\n   \
                  reaper-theme-builder build ./theme Dark.ReaperThemeZip -p c.ini   \x1b[90m# Use a constants file\x1b[0m\n   \
                  reaper-theme-builder scan ./theme                                 \x1b[90m# Show what would be packed\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a .ReaperThemeZip from a theme source folder
    Build(BuildArgs),

    /// Show data directories, fragments and resources without building
    Scan(ScanArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

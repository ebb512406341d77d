use clap::Parser;
use std::path::PathBuf;

/// Arguments for scan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List data directories and resources:\n    reaper-theme-builder scan ./theme\n\n\
                  Machine readable output:\n    reaper-theme-builder scan ./theme --json")]
pub struct ScanArgs {
    /// Theme source folder
    pub input: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Only list resources whose file name matches GLOB (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Theme name used for archive paths (defaults to the folder name)
    #[arg(long)]
    pub name: Option<String>,
}

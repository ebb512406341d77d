//! REAPER theme builder
//!
//! Compiles a theme source folder into a `.ReaperThemeZip`: data directories are
//! discovered, their `rtconfig.txt` and `*.ReaperTheme` fragments merged, `{{...}}`
//! macros evaluated, and the results packed together with the theme images.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod archive;
mod cli;
mod commands;
mod constants;
mod error;
mod expr;
mod fragment;
mod merge;
mod pipeline;
mod resources;
mod scanner;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use error::ThemeError;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("reaper_theme_builder=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn report(error: &ThemeError) {
    eprintln!("Error: {}", error);
    if let Some(help) = error.help() {
        eprintln!("  help: {}", help);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args),
        Commands::Scan(args) => commands::scan::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}

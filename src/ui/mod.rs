//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting while archive members are written
//! - Interactive progress bars using indicatif
//! - Console output for the `scan` command ([`display`])
//!
//! Archive writing reports through the [`ProgressReporter`] trait so the build
//! can run with a visible bar on a terminal and silently in tests and pipes.

pub mod display;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for writing archive members
pub trait ProgressReporter {
    /// Start reporting for `total` members
    fn start(&mut self, total: u64);

    /// A member is being written
    fn member(&mut self, archive_path: &str);

    /// All members written
    fn finish(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Interactive progress reporter with a visual progress bar
pub struct InteractiveProgressReporter {
    bar: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self { bar: None }
    }
}

impl Default for InteractiveProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start(&mut self, total: u64) {
        let style = ProgressStyle::default_bar()
            .template("  [{bar:40.green/yellow}] {pos}/{len} members {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");

        let bar = ProgressBar::new(total);
        bar.set_style(style);
        self.bar = Some(bar);
    }

    fn member(&mut self, archive_path: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(truncate_path(archive_path, 50));
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.abandon();
        }
    }
}

/// Silent progress reporter
///
/// Used when stderr is not a terminal.
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start(&mut self, _total: u64) {}

    fn member(&mut self, _archive_path: &str) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}

/// Pick a reporter for the current terminal
pub fn reporter() -> Box<dyn ProgressReporter> {
    if console::Term::stderr().is_term() {
        Box::new(InteractiveProgressReporter::new())
    } else {
        Box::new(SilentProgressReporter)
    }
}

/// Keep the tail of long paths, which is the part that differs
fn truncate_path(path: &str, max: usize) -> String {
    let count = path.chars().count();
    if count <= max {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max - 3)).collect();
    format!("...{tail}")
}

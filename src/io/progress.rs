//! Terminal progress display for the analysis stages

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:<20}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows one progress bar per analysis stage
///
/// Quiet managers hand out hidden bars, so callers report progress the same
/// way whether or not anything is drawn.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    quiet: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ProgressManager {
    /// Create a progress manager
    pub fn new(quiet: bool) -> Self {
        let multi_progress = MultiProgress::new();
        if quiet {
            multi_progress.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self {
            multi_progress,
            quiet,
        }
    }

    /// Whether output is suppressed
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Start a bar for a stage of `len` steps
    pub fn stage(&self, name: &str, len: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let bar = self.multi_progress.add(ProgressBar::new(len));
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(name.to_string());
        bar
    }

    /// Print a line above the bars
    pub fn message(&self, text: &str) {
        if !self.quiet {
            let _ = self.multi_progress.println(text);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}

//! Progress display for a solve, tracking collapsed cells

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar over the cells of the solved volume
pub struct SolveProgress {
    bar: ProgressBar,
}

impl SolveProgress {
    /// Create a bar for `cells` cells; hidden when `quiet`
    pub fn new(cells: usize, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(cells as u64)
        };
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar }
    }

    /// Reset for a new attempt
    pub fn start_attempt(&self, attempt: u32, seed: u64) {
        self.bar.reset();
        self.bar.set_prefix(format!("attempt {attempt}"));
        self.bar.set_message(format!("seed {seed}"));
    }

    /// Report the number of collapsed cells
    pub fn update(&self, collapsed: usize) {
        self.bar.set_position(collapsed as u64);
    }

    /// Current position of the bar
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Leave the bar with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

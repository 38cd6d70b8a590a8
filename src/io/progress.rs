//! Progress display for solve attempts

use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_REFRESH_INTERVAL};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the explored cells of one solve attempt
pub struct SolveProgress {
    bar: ProgressBar,
}

impl SolveProgress {
    /// Create a bar for a grid of `total` cells, hidden when `visible` is false
    pub fn new(total: usize, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar }
    }

    /// Label the bar with the attempt number and seed
    pub fn start_attempt(&self, attempt: u32, seed: u64) {
        self.bar.reset();
        self.bar.set_prefix(format!("attempt {attempt} (seed {seed})"));
        self.bar.set_message(String::new());
    }

    /// Report explored cells; redraws every few steps and on the last one
    pub fn update(&self, explored: usize, total: usize) {
        if explored % PROGRESS_REFRESH_INTERVAL == 0 || explored == total {
            self.bar.set_length(total as u64);
            self.bar.set_position(explored as u64);
        }
    }

    /// Note a failed attempt without closing the bar
    pub fn fail_attempt(&self, reason: &str) {
        self.bar.set_message(format!("failed: {reason}"));
    }

    /// Close the bar with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Whether the bar draws anything
    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }
}
